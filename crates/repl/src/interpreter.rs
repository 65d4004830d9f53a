use std::io;

use quiz_core::model::QuizId;
use services::{AnswerVerdict, PlayOutcome, PlaySession, QuizService, QuizServiceError};

use crate::command::{Command, CommandError};
use crate::console::{Console, Style};

const PROMPT: &str = "quiz> ";

enum Flow {
    Continue,
    Quit,
}

/// The command loop: prompt, parse, dispatch, render, repeat.
///
/// Every engine failure is reported through the console and the loop keeps
/// going; the only exits are the quit command and end-of-input. One
/// interpreter serves one user, whether that user sits at a terminal or at
/// the far end of a socket.
pub struct Interpreter<C> {
    console: C,
    quizzes: QuizService,
}

impl<C: Console> Interpreter<C> {
    pub fn new(console: C, quizzes: QuizService) -> Self {
        Self { console, quizzes }
    }

    /// Run until quit or end-of-input.
    ///
    /// # Errors
    ///
    /// Returns `io::Error` only for transport failures; command and engine
    /// errors are rendered and swallowed.
    pub async fn run(&mut self) -> io::Result<()> {
        self.console
            .write("Quiz trainer. Type 'help' for the command list.", Style::Highlight)
            .await?;

        loop {
            let Some(line) = self.console.ask(PROMPT).await? else {
                break;
            };

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(CommandError::Empty) => continue,
                Err(err) => {
                    self.error(&err.to_string()).await?;
                    continue;
                }
            };

            if matches!(self.dispatch(command).await?, Flow::Quit) {
                break;
            }
        }
        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Help => {
                self.help().await?;
                Ok(Flow::Continue)
            }
            Command::List => {
                self.list().await?;
                Ok(Flow::Continue)
            }
            Command::Show(id) => {
                self.show(id).await?;
                Ok(Flow::Continue)
            }
            Command::Add => self.add().await,
            Command::Delete(id) => {
                self.delete(id).await?;
                Ok(Flow::Continue)
            }
            Command::Edit(id) => self.edit(id).await,
            Command::Test(id) => self.test(id).await,
            Command::Play => self.play().await,
            Command::Credits => {
                self.credits().await?;
                Ok(Flow::Continue)
            }
            Command::Quit => {
                self.console.write("Goodbye!", Style::Plain).await?;
                Ok(Flow::Quit)
            }
        }
    }

    async fn help(&mut self) -> io::Result<()> {
        for line in [
            "Commands:",
            "  h | help      show this help",
            "  list          list all quizzes",
            "  show <id>     show the question and answer of a quiz",
            "  add           add a new quiz interactively",
            "  delete <id>   delete a quiz",
            "  edit <id>     edit a quiz interactively",
            "  test <id>     answer a single quiz",
            "  p | play      answer every quiz in random order",
            "  credits       show the credits",
            "  q | quit      exit",
        ] {
            self.console.write(line, Style::Plain).await?;
        }
        Ok(())
    }

    async fn list(&mut self) -> io::Result<()> {
        match self.quizzes.list_quizzes().await {
            Ok(all) => {
                for quiz in all {
                    let line = format!("[{}]: {}", quiz.id(), quiz.question());
                    self.console.write(&line, Style::Plain).await?;
                }
                Ok(())
            }
            Err(err) => self.report(None, &err).await,
        }
    }

    async fn show(&mut self, id: QuizId) -> io::Result<()> {
        match self.quizzes.get_quiz(id).await {
            Ok(quiz) => {
                let line = format!("[{}]: {} => {}", quiz.id(), quiz.question(), quiz.answer());
                self.console.write(&line, Style::Plain).await
            }
            Err(err) => self.report(Some(id), &err).await,
        }
    }

    async fn add(&mut self) -> io::Result<Flow> {
        let Some(question) = self.console.ask("Question: ").await? else {
            return Ok(Flow::Quit);
        };
        let Some(answer) = self.console.ask("Answer: ").await? else {
            return Ok(Flow::Quit);
        };

        match self.quizzes.add_quiz(question, answer).await {
            Ok(quiz) => {
                let line = format!("Added [{}]: {} => {}", quiz.id(), quiz.question(), quiz.answer());
                self.console.write(&line, Style::Plain).await?;
            }
            Err(err) => self.report(None, &err).await?,
        }
        Ok(Flow::Continue)
    }

    async fn delete(&mut self, id: QuizId) -> io::Result<()> {
        match self.quizzes.delete_quiz(id).await {
            Ok(()) => {
                let line = format!("Deleted quiz {id}.");
                self.console.write(&line, Style::Plain).await
            }
            Err(err) => self.report(Some(id), &err).await,
        }
    }

    async fn edit(&mut self, id: QuizId) -> io::Result<Flow> {
        let current = match self.quizzes.get_quiz(id).await {
            Ok(quiz) => quiz,
            Err(err) => {
                self.report(Some(id), &err).await?;
                return Ok(Flow::Continue);
            }
        };

        // An empty reply keeps the current text.
        let prompt = format!("Question [{}]: ", current.question());
        let Some(question) = self.console.ask(&prompt).await? else {
            return Ok(Flow::Quit);
        };
        let prompt = format!("Answer [{}]: ", current.answer());
        let Some(answer) = self.console.ask(&prompt).await? else {
            return Ok(Flow::Quit);
        };

        let question = if question.trim().is_empty() {
            current.question().to_owned()
        } else {
            question
        };
        let answer = if answer.trim().is_empty() {
            current.answer().to_owned()
        } else {
            answer
        };

        match self.quizzes.edit_quiz(id, question, answer).await {
            Ok(quiz) => {
                let line = format!(
                    "Changed quiz [{}] to: {} => {}",
                    quiz.id(),
                    quiz.question(),
                    quiz.answer()
                );
                self.console.write(&line, Style::Plain).await?;
            }
            Err(err) => self.report(Some(id), &err).await?,
        }
        Ok(Flow::Continue)
    }

    async fn test(&mut self, id: QuizId) -> io::Result<Flow> {
        let quiz = match self.quizzes.get_quiz(id).await {
            Ok(quiz) => quiz,
            Err(err) => {
                self.report(Some(id), &err).await?;
                return Ok(Flow::Continue);
            }
        };

        let line = format!("Question: {}", quiz.question());
        self.console.write(&line, Style::Highlight).await?;
        let Some(submission) = self.console.ask("Answer: ").await? else {
            return Ok(Flow::Quit);
        };

        match self.quizzes.check_answer(id, &submission).await {
            Ok(true) => self.console.write("Correct", Style::Plain).await?,
            Ok(false) => self.console.write("Incorrect", Style::Plain).await?,
            Err(err) => self.report(Some(id), &err).await?,
        }
        Ok(Flow::Continue)
    }

    async fn play(&mut self) -> io::Result<Flow> {
        let snapshot = match self.quizzes.play_snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.report(None, &err).await?;
                return Ok(Flow::Continue);
            }
        };
        let mut session = PlaySession::new(snapshot);

        loop {
            let question = match session.next_question() {
                Some(quiz) => format!("Question: {}", quiz.question()),
                None => break,
            };
            self.console.write(&question, Style::Highlight).await?;

            let Some(submission) = self.console.ask("Answer: ").await? else {
                return Ok(Flow::Quit);
            };

            match session.submit_answer(&submission) {
                Ok(AnswerVerdict::Correct) => {
                    let line = format!("Correct. Score: {}", session.score());
                    self.console.write(&line, Style::Plain).await?;
                }
                Ok(AnswerVerdict::Incorrect) | Err(_) => break,
            }
        }

        let message = match session.outcome() {
            Some(PlayOutcome::Won) => {
                format!("You answered everything. Final score: {}", session.score())
            }
            Some(PlayOutcome::Lost) => {
                format!("Wrong answer. Game over. Final score: {}", session.score())
            }
            Some(PlayOutcome::Empty) => "There are no quizzes to play. Final score: 0".to_owned(),
            None => format!("Game over. Final score: {}", session.score()),
        };
        self.console.write(&message, Style::Highlight).await?;
        Ok(Flow::Continue)
    }

    async fn credits(&mut self) -> io::Result<()> {
        self.console.write("Quiz trainer", Style::Highlight).await?;
        self.console
            .write("Maintained by the quiz-trainer contributors.", Style::Plain)
            .await
    }

    async fn report(&mut self, id: Option<QuizId>, err: &QuizServiceError) -> io::Result<()> {
        let message = match (id, err) {
            (Some(id), QuizServiceError::NotFound) => format!("no quiz exists with id {id}"),
            _ => err.to_string(),
        };
        self.error(&message).await
    }

    async fn error(&mut self, message: &str) -> io::Result<()> {
        let line = format!("error: {message}");
        self.console.write(&line, Style::Error).await
    }
}
