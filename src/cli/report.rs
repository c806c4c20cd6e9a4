use std::io::Write;

use ansi_term::Colour::{Green, Red};
use anyhow::Result;

use crate::extract::document::MessageOutcome;

const RULE: &str = "------------------------------------------------------";

/// Prints what happened to every message of a file, matches in green and everything else in red.
pub fn print_file_outcomes(
    out: &mut impl Write,
    name: &str,
    outcomes: &[MessageOutcome],
) -> Result<()> {
    writeln!(out, "--------------Matching file {name}--------------")?;
    for outcome in outcomes {
        let line = match outcome {
            MessageOutcome::Recorded { text, .. } => {
                Green.paint(format!("Matched: {}", text.trim()))
            }
            MessageOutcome::Unmatched { text } => Red.paint(format!("No match: {}", text.trim())),
            MessageOutcome::MissingParent { text } => {
                Red.paint(format!("No parent message div found for: {text}"))
            }
            MessageOutcome::MissingDate { text } => {
                Red.paint(format!("No date element found for: {}", text.trim()))
            }
        };
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{RULE}")?;
    Ok(())
}

pub fn print_file_counts(out: &mut impl Write, files: &[(String, usize)]) -> Result<()> {
    for (name, count) in files {
        writeln!(out, "Extracted {count} data points from {name}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{print_file_counts, print_file_outcomes};
    use crate::{
        extract::{document::MessageOutcome, entities::Sample},
        utils::percentage::Percentage,
    };

    #[test]
    fn outcomes_are_listed_in_order() -> Result<()> {
        let sample = Sample {
            moment: NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(14, 22, 10)
                .unwrap(),
            wpm: 87.5,
            accuracy: Percentage::new_opt(96.).unwrap(),
        };
        let outcomes = vec![
            MessageOutcome::Recorded {
                text: "  {layout=colemak_DH,wpm=87.5,accuracy=96%}\n".into(),
                sample,
            },
            MessageOutcome::Unmatched {
                text: " hi ".into(),
            },
            MessageOutcome::MissingDate {
                text: "{layout=colemak_DH,wpm=1,accuracy=1%}".into(),
            },
        ];

        let mut out = vec![];
        print_file_outcomes(&mut out, "messages.html", &outcomes)?;
        let out = String::from_utf8(out)?;
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("Matching file messages.html"));
        assert!(lines[1].contains("Matched: {layout=colemak_DH,wpm=87.5,accuracy=96%}"));
        // colored
        assert!(lines[1].starts_with("\u{1b}["));
        assert!(lines[2].contains("No match: hi"));
        assert!(lines[3].contains("No date element found for"));
        Ok(())
    }

    #[test]
    fn counts_per_file() -> Result<()> {
        let mut out = vec![];
        print_file_counts(
            &mut out,
            &[("messages.html".into(), 3), ("messages2.html".into(), 0)],
        )?;
        assert_eq!(
            String::from_utf8(out)?,
            "Extracted 3 data points from messages.html\nExtracted 0 data points from messages2.html\n"
        );
        Ok(())
    }
}
