use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use clap::Parser;
use nd_core::{Category, Country, NewsQuery, DEFAULT_ARTICLES, MAX_ARTICLES};
use nd_inference::ModelKind;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch, summarize and classify the latest headlines", long_about = None)]
pub struct Cli {
    #[arg(long, value_enum, default_value_t = Category::Technology)]
    pub category: Category,
    #[arg(long, value_enum, default_value_t = Country::Us)]
    pub country: Country,
    /// Number of articles to fetch
    #[arg(long, default_value_t = DEFAULT_ARTICLES, value_parser = parse_count)]
    pub count: usize,
    /// Ask for category, country, count and export on the terminal
    #[arg(long, short)]
    pub interactive: bool,
    /// Save results as CSV; without a path a timestamped file is written
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
    /// Use the provider's text instead of downloading each article page
    #[arg(long)]
    pub no_fetch_body: bool,
    #[arg(long, value_enum, default_value = "heuristic")]
    pub model: ModelKind,
    /// Base URL of the chat-completions API used by the deepseek model
    #[arg(long)]
    pub model_url: Option<String>,
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn query(&self) -> NewsQuery {
        NewsQuery::new(self.category, self.country, self.count)
    }
}

fn parse_count(s: &str) -> Result<usize, String> {
    let count: usize = s.parse().map_err(|_| format!("`{}` is not a number", s))?;
    if (1..=MAX_ARTICLES).contains(&count) {
        Ok(count)
    } else {
        Err(format!("count must be between 1 and {}", MAX_ARTICLES))
    }
}

/// Terminal prompts. Blank answers keep the default; invalid ones fall back to it with a notice.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim().to_lowercase())
    }

    pub fn query(&mut self, defaults: NewsQuery) -> io::Result<NewsQuery> {
        let categories = Category::ALL.map(|c| c.as_str()).join(", ");
        let answer = self.ask(&format!("Enter news category ({}): ", categories))?;
        let category = if answer.is_empty() {
            defaults.category
        } else {
            match answer.parse::<Category>() {
                Ok(category) => category,
                Err(_) => {
                    writeln!(self.output, "Invalid category. Using default: {}", defaults.category)?;
                    defaults.category
                }
            }
        };

        let countries = Country::ALL.map(|c| c.as_str()).join(", ");
        let answer = self.ask(&format!("Enter country code ({}): ", countries))?;
        let country = if answer.is_empty() {
            defaults.country
        } else {
            match answer.parse::<Country>() {
                Ok(country) => country,
                Err(_) => {
                    writeln!(self.output, "Invalid country code. Using default: {}", defaults.country)?;
                    defaults.country
                }
            }
        };

        let answer = self.ask(&format!("Number of articles to fetch (1-{}): ", MAX_ARTICLES))?;
        let count = if answer.is_empty() {
            defaults.count()
        } else {
            match parse_count(&answer) {
                Ok(count) => count,
                Err(_) => {
                    writeln!(self.output, "Invalid number of articles. Using default: {}", defaults.count())?;
                    defaults.count()
                }
            }
        };

        Ok(NewsQuery::new(category, country, count))
    }

    pub fn confirm_export(&mut self) -> io::Result<bool> {
        let answer = self.ask("\nSave results to CSV? (y/n): ")?;
        Ok(matches!(answer.as_str(), "y" | "yes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(answers: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(answers.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1"), Ok(1));
        assert_eq!(parse_count("10"), Ok(10));
        assert!(parse_count("0").is_err());
        assert!(parse_count("11").is_err());
        assert!(parse_count("five").is_err());
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["nd"]);
        assert_eq!(cli.query(), NewsQuery::default());
        assert!(cli.export.is_none());
        assert_eq!(cli.model, ModelKind::Heuristic);
    }

    #[test]
    fn test_cli_arguments() {
        let cli = Cli::parse_from([
            "nd", "--category", "health", "--country", "gb", "--count", "3", "--export", "--model", "deepseek",
        ]);
        assert_eq!(cli.query(), NewsQuery::new(Category::Health, Country::Gb, 3));
        assert_eq!(cli.export, Some(None));
        assert_eq!(cli.model, ModelKind::DeepSeek);

        let cli = Cli::parse_from(["nd", "--export", "out.csv"]);
        assert_eq!(cli.export, Some(Some(PathBuf::from("out.csv"))));

        assert!(Cli::try_parse_from(["nd", "--count", "11"]).is_err());
        assert!(Cli::try_parse_from(["nd", "--country", "fr"]).is_err());
    }

    #[test]
    fn test_prompt_accepts_answers() {
        let mut prompt = prompt("Science\nca\n8\n");
        let query = prompt.query(NewsQuery::default()).unwrap();
        assert_eq!(query, NewsQuery::new(Category::Science, Country::Ca, 8));
    }

    #[test]
    fn test_prompt_blank_answers_keep_defaults() {
        let mut prompt = prompt("\n\n\n");
        let defaults = NewsQuery::new(Category::Sports, Country::Au, 2);
        assert_eq!(prompt.query(defaults).unwrap(), defaults);
    }

    #[test]
    fn test_prompt_invalid_answers_fall_back() {
        let mut prompt = prompt("politics\nfr\n42\n");
        let query = prompt.query(NewsQuery::default()).unwrap();
        assert_eq!(query, NewsQuery::default());

        let output = String::from_utf8(prompt.output).unwrap();
        assert!(output.contains("Invalid category. Using default: technology"));
        assert!(output.contains("Invalid country code. Using default: us"));
        assert!(output.contains("Invalid number of articles. Using default: 5"));
    }

    #[test]
    fn test_confirm_export() {
        assert!(prompt("y\n").confirm_export().unwrap());
        assert!(prompt("YES\n").confirm_export().unwrap());
        assert!(!prompt("n\n").confirm_export().unwrap());
        assert!(!prompt("").confirm_export().unwrap());
    }
}
