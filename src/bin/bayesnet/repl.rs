//! The interactive read loop: one query per line, `STOP` to quit.

use bayesnet_core::query::QueryEvaluator;
use std::io::{BufRead, Write};

const BANNER: &str = "Welcome to the Bayesian Network Inferencer.\n\
Enter a query in the form S=T|W=T,R=F (T or F for each variable).\n\
Enter 'STOP' when you are done.";

pub fn run<R: BufRead, W: Write>(
    evaluator: &QueryEvaluator<'_>,
    input: R,
    mut output: W,
) -> Result<(), Box<dyn std::error::Error>> {
    writeln!(output, "{BANNER}")?;
    write!(output, "> ")?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("STOP") {
            break;
        }
        if !trimmed.is_empty() {
            match evaluator.evaluate_str(trimmed) {
                Ok(probability) => writeln!(output, "That probability is {probability}")?,
                Err(e) if e.is_recoverable() => writeln!(output, "Error: {e}")?,
                Err(e) => return Err(e.into()),
            }
        }
        write!(output, "> ")?;
        output.flush()?;
    }

    writeln!(output, "Exit")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayesnet_core::network::sample::sprinkler;
    use std::io::Cursor;

    #[test]
    fn answers_until_stop() {
        let network = sprinkler().unwrap();
        let evaluator = QueryEvaluator::new(&network);
        let input = Cursor::new("S=T|W=T\nX=T\n\nstop\nW=T\n");
        let mut output = Vec::new();
        run(&evaluator, input, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("That probability is 0.75"));
        assert!(text.contains("Error: "));
        assert!(!text.contains("That probability is 0.6"));
        assert!(text.ends_with("Exit\n"));
    }
}
