//! Plain line-oriented front end
//!
//! Same game as the TUI, played over any reader and writer. Used with
//! `--plain` and by the integration tests.

use std::io::{BufRead, Write};

use rand::Rng;
use tracing::debug;

use crate::drill::{DrillSettings, Session, DIFFICULTIES, MULTIPLIERS};
use crate::Result;

/// Line reader that reports end of input as `None`
struct Prompter<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> Prompter<I, O> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Ask until the answer is empty (keep `default`), allowed, or `q`
    fn choose(&mut self, prompt: &str, default: u32, allowed: &[u32]) -> Result<Option<u32>> {
        loop {
            let line = match self.ask(prompt)? {
                Some(line) => line,
                None => return Ok(None),
            };
            if line.eq_ignore_ascii_case("q") {
                return Ok(None);
            }
            if line.is_empty() {
                return Ok(Some(default));
            }
            match line.parse::<u32>() {
                Ok(value) if allowed.contains(&value) => return Ok(Some(value)),
                _ => self.say(&format!("Please pick one of {:?}.", allowed))?,
            }
        }
    }
}

/// Choice made after a session ends
enum Next {
    Restart,
    Exit,
    Quit,
}

/// Play drills over `input`/`output` until the user quits or input ends
pub fn run_plain<I, O, G>(input: I, output: O, defaults: DrillSettings, mut rng: G) -> Result<()>
where
    I: BufRead,
    O: Write,
    G: Rng,
{
    let mut io = Prompter { input, output };
    let tables: Vec<u32> = MULTIPLIERS.collect();
    let mut defaults = defaults;

    io.say("xDrills - times table practice")?;
    loop {
        let multiplier = match io.choose(
            &format!("Choose a table (2-12) [{}]: ", defaults.multiplier()),
            defaults.multiplier(),
            &tables,
        )? {
            Some(m) => m,
            None => break,
        };
        let difficulty = match io.choose(
            &format!("Questions (5/10/15/20) [{}]: ", defaults.difficulty()),
            defaults.difficulty(),
            &DIFFICULTIES,
        )? {
            Some(d) => d,
            None => break,
        };

        let settings = DrillSettings::new(multiplier, difficulty)?;
        defaults = settings;

        if !play_session(&mut io, settings, &mut rng)? {
            break;
        }
    }

    io.say("Bye!")?;
    Ok(())
}

/// Run one session. Returns false when the user asked to quit.
fn play_session<I, O, G>(
    io: &mut Prompter<I, O>,
    settings: DrillSettings,
    rng: &mut G,
) -> Result<bool>
where
    I: BufRead,
    O: Write,
    G: Rng,
{
    let mut session = Session::new(settings, rng);
    loop {
        while !session.is_finished() {
            let prompt = format!(
                "[{}/{}] {} x {} = ? ",
                session.question_number(),
                settings.difficulty(),
                settings.multiplier(),
                session.multiplicand()
            );
            let line = match io.ask(&prompt)? {
                Some(line) => line,
                None => return Ok(false),
            };

            if line.eq_ignore_ascii_case("q") {
                return Ok(false);
            }
            if line.eq_ignore_ascii_case("s") {
                session.skip()?;
                io.say("Skipped.")?;
                continue;
            }
            if line.is_empty() {
                session.set_answer(None);
            } else {
                match line.parse::<u32>() {
                    Ok(value) => session.set_answer(Some(value)),
                    Err(_) => {
                        io.say("Please enter a number, 's' to skip or 'q' to quit.")?;
                        continue;
                    }
                }
            }

            let outcome = session.submit()?;
            io.say(&format!(
                "{} {}  Score: {}",
                outcome.feedback.title,
                outcome.feedback.message,
                session.score()
            ))?;
        }

        if let Some(summary) = session.summary() {
            io.say("")?;
            io.say(&format!("{} ({} missed)", summary.title, summary.missed()))?;
            io.say(&summary.message)?;
        }

        match ask_next(io)? {
            Next::Restart => {
                session.restart()?;
                debug!("plain session restarted");
            }
            Next::Exit => {
                session.exit()?;
                return Ok(true);
            }
            Next::Quit => return Ok(false),
        }
    }
}

fn ask_next<I: BufRead, O: Write>(io: &mut Prompter<I, O>) -> Result<Next> {
    loop {
        let line = match io.ask("[r]estart or [e]xit? ")? {
            Some(line) => line.to_ascii_lowercase(),
            None => return Ok(Next::Quit),
        };
        match line.as_str() {
            "r" | "restart" => return Ok(Next::Restart),
            "e" | "exit" => return Ok(Next::Exit),
            "q" => return Ok(Next::Quit),
            _ => io.say("Please answer 'r' or 'e'.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::io::Cursor;

    fn play(script: &str) -> String {
        let mut output = Vec::new();
        run_plain(
            Cursor::new(script.to_string()),
            &mut output,
            DrillSettings::default(),
            StepRng::new(0, 0),
        )
        .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_quit_immediately() {
        let out = play("q\n");
        assert!(out.contains("Choose a table (2-12) [2]: "));
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_end_of_input_quits() {
        let out = play("");
        assert!(out.ends_with("Bye!\n"));
    }

    #[test]
    fn test_invalid_choices_reprompt() {
        let out = play("13\nabc\n3\n7\nq\n");
        assert_eq!(out.matches("Please pick one of").count(), 3);
        assert!(out.contains("Questions (5/10/15/20) [5]: "));
    }

    #[test]
    fn test_skip_whole_session() {
        let out = play("\n\ns\ns\ns\ns\ns\ne\nq\n");
        assert_eq!(out.matches("Skipped.").count(), 5);
        assert!(out.contains("[5/5]"));
        assert!(out.contains("Finished! (5 missed)"));
        assert!(out.contains("You have finished 5 questions.\n0 answers were correct."));
    }

    #[test]
    fn test_non_numeric_answer_is_not_submitted() {
        let out = play("\n\nabc\nq\n");
        assert!(out.contains("Please enter a number"));
        assert!(!out.contains("Wrong!"));
        assert_eq!(out.matches("[1/5]").count(), 2);
    }
}
