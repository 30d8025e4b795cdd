use std::io::{self, Write};
use chrono::NaiveDateTime;
use crossterm::style::{style, Color, Stylize};
use nd_core::{ProcessedArticle, Sentiment};

const RULE_WIDTH: usize = 80;

fn paint(sentiment: Sentiment, color: bool) -> String {
    if !color {
        return sentiment.to_string();
    }
    let color = match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Neutral => Color::Yellow,
        Sentiment::Negative => Color::Red,
        Sentiment::Unknown => Color::DarkGrey,
    };
    style(sentiment.as_str()).with(color).to_string()
}

pub fn print_results<W: Write>(
    out: &mut W,
    results: &[ProcessedArticle],
    now: NaiveDateTime,
    color: bool,
) -> io::Result<()> {
    writeln!(out, "\n{}", "=".repeat(RULE_WIDTH))?;
    writeln!(out, "NEWS SUMMARIES ({})", now.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    if results.is_empty() {
        writeln!(out, "\nNo articles found.")?;
    }

    for (i, article) in results.iter().enumerate() {
        writeln!(out, "\n{}. {}", i + 1, article.title)?;
        writeln!(out, "Source: {} | {}", article.source, article.published_at)?;
        if !article.url.is_empty() {
            writeln!(out, "URL: {}", article.url)?;
        }
        writeln!(out, "{}", "-".repeat(40))?;

        if article.summary.is_empty() {
            writeln!(out, "No summary available.")?;
        } else {
            writeln!(out, "SUMMARY:")?;
            writeln!(out, "{}", article.summary)?;
        }

        let label = paint(article.sentiment, color);
        match article.score {
            Some(score) => writeln!(
                out,
                "\nSENTIMENT: {} {} (score: {:.2})",
                label,
                article.sentiment.emoji(),
                score
            )?,
            None => writeln!(out, "\nSENTIMENT: {} {}", label, article.sentiment.emoji())?,
        }
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
    }
    Ok(())
}
