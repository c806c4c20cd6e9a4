use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::extract::entities::Sample;

use super::{extract_input, input::InputArgs};

#[derive(Debug, Parser)]
pub struct SamplesCommand {
    #[command(flatten)]
    input: InputArgs,
}

/// Prints extracted samples as json lines. Diagnostics go to stderr so the output can be piped.
pub async fn process_samples_command(SamplesCommand { input }: SamplesCommand) -> Result<()> {
    write_samples(
        &input,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )
    .await
}

async fn write_samples(
    input: &InputArgs,
    out: &mut impl Write,
    diagnostics: &mut impl Write,
) -> Result<()> {
    let samples = extract_input(input, diagnostics).await?;
    print_samples(out, &samples)
}

fn print_samples(out: &mut impl Write, samples: &[Sample]) -> Result<()> {
    for sample in samples {
        serde_json::to_writer(&mut *out, sample)?;
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use clap::Parser;
    use tempfile::tempdir;

    use super::{print_samples, write_samples, SamplesCommand};
    use crate::{
        extract::entities::Sample,
        utils::{logging::TEST_LOGGING, percentage::Percentage},
    };

    #[test]
    fn one_json_object_per_line() -> Result<()> {
        let samples = (0..3)
            .map(|i| Sample {
                moment: NaiveDate::from_ymd_opt(2024, 3, 5)
                    .unwrap()
                    .and_hms_opt(10 + i, 0, 0)
                    .unwrap(),
                wpm: 60. + i as f64,
                accuracy: Percentage::new_opt(95.5).unwrap(),
            })
            .collect::<Vec<_>>();

        let mut out = vec![];
        print_samples(&mut out, &samples)?;
        let out = String::from_utf8(out)?;

        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        let last: serde_json::Value = serde_json::from_str(lines[2])?;
        assert_eq!(last["moment"], "2024-03-05T12:00:00");
        assert_eq!(last["wpm"], 62.0);
        assert_eq!(last["accuracy"], 95.5);
        Ok(())
    }

    #[tokio::test]
    async fn stdout_holds_only_json_lines() -> Result<()> {
        *TEST_LOGGING;

        let dir = tempdir()?;
        std::fs::write(
            dir.path().join("messages.html"),
            r#"<html><body>
                 <div class="message default"><div class="pull_right date details" title="01.03.2024 10:00:00 UTC+00:00"></div><div class="text">{layout=colemak_DH,wpm=40,accuracy=90%}</div></div>
                 <div class="message default"><div class="pull_right date details" title="01.03.2024 10:05:00 UTC+00:00"></div><div class="text">hello</div></div>
                 <div class="message default"><div class="pull_right date details" title="02.03.2024 09:00:00 UTC+00:00"></div><div class="text">{layout=colemak_DH,wpm=42.5,accuracy=91%}</div></div>
               </body></html>"#,
        )?;
        let dir_arg = dir.path().to_string_lossy().to_string();
        let command = SamplesCommand::try_parse_from(["samples", "--dir", dir_arg.as_str()])?;

        let mut out = vec![];
        let mut diagnostics = vec![];
        write_samples(&command.input, &mut out, &mut diagnostics).await?;

        let out = String::from_utf8(out)?;
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line)?;
            assert!(value.is_object());
        }
        let diagnostics = String::from_utf8(diagnostics)?;
        assert!(diagnostics.contains("No match: hello"));
        assert!(diagnostics.contains("Extracted 2 data points from messages.html"));
        Ok(())
    }
}
