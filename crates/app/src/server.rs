use std::future::Future;
use std::io;

use log::{error, info};
use repl::{Interpreter, LineConsole};
use services::QuizService;
use tokio::io::BufReader;
use tokio::net::{TcpListener, TcpStream};

struct Listener {
    listener: TcpListener,
    quizzes: QuizService,
}

/// Accept connections until the shutdown future resolves.
///
/// Each connection gets its own interpreter and its own session state; the
/// only thing connections share is the storage behind `quizzes`.
pub async fn run(listener: TcpListener, quizzes: QuizService, shutdown: impl Future) {
    let mut server = Listener { listener, quizzes };

    tokio::select! {
        res = server.run() => {
            if let Err(err) = res {
                error!("failed to accept connection: {err}");
            }
        }
        _ = shutdown => {
            info!("shutting down");
        }
    }
}

impl Listener {
    async fn run(&mut self) -> io::Result<()> {
        loop {
            let (socket, addr) = self.listener.accept().await?;
            info!("client connected: {addr}");

            let quizzes = self.quizzes.clone();
            tokio::spawn(async move {
                if let Err(err) = handle_connection(socket, quizzes).await {
                    error!("connection error ({addr}): {err}");
                }
                info!("client disconnected: {addr}");
            });
        }
    }
}

async fn handle_connection(socket: TcpStream, quizzes: QuizService) -> io::Result<()> {
    let (read_half, write_half) = socket.into_split();
    // no ANSI over the wire; clients are plain netcat-style terminals
    let console = LineConsole::new(BufReader::new(read_half), write_half);
    let mut interpreter = Interpreter::new(console, quizzes);
    interpreter.run().await
}
