use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use super::{entities::Sample, tag::TagPattern};

const TEXT_SELECTOR: &str = "div.text";
const DATE_SELECTOR: &str = "div.pull_right.date.details";
const MESSAGE_CLASS: &str = "message";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// What happened to a single `text` element of an export.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageOutcome {
    Recorded { text: String, sample: Sample },
    Unmatched { text: String },
    /// Tag found, but the element is not inside a message.
    MissingParent { text: String },
    /// Tag found, but the message carries no date.
    MissingDate { text: String },
}

impl MessageOutcome {
    /// Everything except [MessageOutcome::Unmatched] counts as a match, even if no sample was
    /// recorded.
    pub fn is_match(&self) -> bool {
        !matches!(self, MessageOutcome::Unmatched { .. })
    }

    pub fn sample(&self) -> Option<&Sample> {
        match self {
            MessageOutcome::Recorded { sample, .. } => Some(sample),
            _ => None,
        }
    }
}

/// Goes over every `text` element of an exported chat page in document order.
pub fn extract_document(html: &str, pattern: &TagPattern) -> Result<Vec<MessageOutcome>> {
    let document = Html::parse_document(html);
    let text_selector = parse_selector(TEXT_SELECTOR)?;
    let date_selector = parse_selector(DATE_SELECTOR)?;

    let mut outcomes = vec![];
    for element in document.select(&text_selector) {
        let text = element.text().collect::<String>();
        let Some((wpm, accuracy)) = pattern.parse(&text)? else {
            outcomes.push(MessageOutcome::Unmatched { text });
            continue;
        };

        let Some(message) = enclosing_message(element) else {
            outcomes.push(MessageOutcome::MissingParent { text });
            continue;
        };

        // Only the first date element of a message counts.
        let Some(title) = message
            .select(&date_selector)
            .next()
            .and_then(|date| date.value().attr("title"))
        else {
            warn!("Message with a result has no date: {}", text.trim());
            outcomes.push(MessageOutcome::MissingDate { text });
            continue;
        };

        let sample = Sample {
            moment: parse_timestamp(title)?,
            wpm,
            accuracy,
        };
        outcomes.push(MessageOutcome::Recorded { text, sample });
    }
    Ok(outcomes)
}

/// Parses export dates like `05.03.2024 14:22:10 UTC+00:00`. Everything from ` UTC` on is
/// dropped.
pub fn parse_timestamp(title: &str) -> Result<NaiveDateTime> {
    let date = title.split(" UTC").next().unwrap_or(title);
    NaiveDateTime::parse_from_str(date, TIMESTAMP_FORMAT)
        .with_context(|| format!("Malformed message date {title:?}"))
}

fn enclosing_message(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|v| v.value().name() == "div" && v.value().classes().any(|c| c == MESSAGE_CLASS))
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| anyhow!("Invalid selector {selector}: {e}"))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;

    use super::{extract_document, parse_timestamp, MessageOutcome};
    use crate::extract::tag::TagPattern;

    fn message(date: Option<&str>, text: &str) -> String {
        let date = date
            .map(|d| format!(r#"<div class="pull_right date details" title="{d}">14:22</div>"#))
            .unwrap_or_default();
        format!(
            r#"<div class="message default clearfix" id="message1">
                 <div class="body">
                   {date}
                   <div class="from_name">Me</div>
                   <div class="text">{text}</div>
                 </div>
               </div>"#
        )
    }

    fn page(body: &str) -> String {
        format!("<html><body><div class=\"history\">{body}</div></body></html>")
    }

    #[test]
    fn records_sample_from_message() -> Result<()> {
        let html = page(&message(
            Some("05.03.2024 14:22:10 UTC+00:00"),
            "{layout=colemak_DH,wpm=87.5,accuracy=96%}",
        ));
        let outcomes = extract_document(&html, &TagPattern::default())?;

        assert_eq!(outcomes.len(), 1);
        let sample = outcomes[0].sample().unwrap();
        assert_eq!(
            sample.moment,
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(14, 22, 10)
                .unwrap()
        );
        assert_eq!(sample.wpm, 87.5);
        assert_eq!(*sample.accuracy, 96.);
        Ok(())
    }

    #[test]
    fn keeps_document_order_and_skips_unmatched() -> Result<()> {
        let html = page(&format!(
            "{}{}{}",
            message(
                Some("01.03.2024 10:00:00 UTC+00:00"),
                "{layout=colemak_DH,wpm=50,accuracy=90%}"
            ),
            message(Some("01.03.2024 11:00:00 UTC+00:00"), "good morning"),
            message(
                Some("02.03.2024 10:00:00 UTC+00:00"),
                "{layout=colemak_DH,wpm=55,accuracy=91%}"
            ),
        ));
        let outcomes = extract_document(&html, &TagPattern::default())?;

        assert_eq!(outcomes.len(), 3);
        assert!(matches!(&outcomes[1], MessageOutcome::Unmatched { text } if text == "good morning"));
        let wpm = outcomes
            .iter()
            .filter_map(|v| v.sample())
            .map(|v| v.wpm)
            .collect::<Vec<_>>();
        assert_eq!(wpm, vec![50., 55.]);
        Ok(())
    }

    #[test]
    fn match_without_date_is_counted_but_not_recorded() -> Result<()> {
        let html = page(&message(None, "{layout=colemak_DH,wpm=70,accuracy=97%}"));
        let outcomes = extract_document(&html, &TagPattern::default())?;

        assert!(matches!(outcomes[0], MessageOutcome::MissingDate { .. }));
        assert!(outcomes[0].is_match());
        assert!(outcomes[0].sample().is_none());
        Ok(())
    }

    #[test]
    fn only_first_date_element_is_used() -> Result<()> {
        let html = page(
            r#"<div class="message default">
                 <div class="pull_right date details">14:22</div>
                 <div class="pull_right date details" title="05.03.2024 14:22:10 UTC+00:00">14:22</div>
                 <div class="text">{layout=colemak_DH,wpm=70,accuracy=97%}</div>
               </div>"#,
        );
        let outcomes = extract_document(&html, &TagPattern::default())?;

        assert!(matches!(outcomes[0], MessageOutcome::MissingDate { .. }));
        Ok(())
    }

    #[test]
    fn match_outside_message_is_reported() -> Result<()> {
        let html = page(r#"<div class="text">{layout=colemak_DH,wpm=70,accuracy=97%}</div>"#);
        let outcomes = extract_document(&html, &TagPattern::default())?;

        assert!(matches!(outcomes[0], MessageOutcome::MissingParent { .. }));
        Ok(())
    }

    #[test]
    fn text_is_collected_across_nested_elements() -> Result<()> {
        let html = page(&message(
            Some("05.03.2024 14:22:10 UTC+00:00"),
            "<strong>result</strong> {layout=colemak_DH,wpm=61,<br>accuracy=92%}",
        ));
        let outcomes = extract_document(&html, &TagPattern::default())?;

        // The <br> splits nothing, text nodes are concatenated as they are.
        assert_eq!(outcomes[0].sample().map(|v| v.wpm), Some(61.));
        Ok(())
    }

    #[test]
    fn malformed_date_aborts() {
        let html = page(&message(
            Some("2024-03-05 14:22:10 UTC+00:00"),
            "{layout=colemak_DH,wpm=61,accuracy=92%}",
        ));
        assert!(extract_document(&html, &TagPattern::default()).is_err());
    }

    #[test]
    fn timestamp_drops_zone_suffix() -> Result<()> {
        let moment = parse_timestamp("31.12.2023 23:59:59 UTC+03:00")?;
        assert_eq!(moment.to_string(), "2023-12-31 23:59:59");
        Ok(())
    }
}
