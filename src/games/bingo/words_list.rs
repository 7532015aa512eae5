use tracing::{debug, warn};

use crate::config::WordsConfig;

/// The pool used whenever the external list is unavailable.
const DEFAULT_WORDS: [&str; 54] = [
    "ProWorks",
    "Umbraco",
    "Hackathon",
    "Community",
    "Friendly",
    "OpenSource",
    "Examine",
    "CodeGarden",
    "Heartcore",
    "Uno",
    "Cloud",
    "BackOffice",
    "FrontEnd",
    "CMS",
    "UmbracoForms",
    "Courier",
    "Deploy",
    "Headless",
    "Gridsome",
    "LoadBalancing",
    "JAMstack",
    "Staging",
    "Authoring",
    "Production",
    "Sitemap",
    "Team",
    "Collaboration",
    "Migration",
    "CSS",
    "Hacktoberfest",
    "Unicore",
    "SingleSignOn",
    "VueJS",
    "NoUmbraco9",
    "PreviewAPI",
    "GraphQL",
    "BlockListEditor",
    "Grid",
    "StackedContent",
    "Contentment",
    "WYSIWYG",
    "Documentation",
    "GoldPartner",
    "UmbracoCertified",
    "MVP",
    "CodePatch",
    "DUUGfest",
    "USFest",
    "Retreat",
    "Packages",
    "Roundtable",
    "UmbracoTees",
    "UmbraFriday",
    "Training",
];

/// Sources the candidate word pool for a new game: a timeout-bounded
/// fetch of a newline-delimited list, falling back to the built-in
/// default on any failure. Degradation is logged, never surfaced.
#[derive(Debug, Clone)]
pub struct WordsList {
    url: Option<String>,
    client: reqwest::Client,
}

impl WordsList {
    pub fn new(config: &WordsConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("default tls backend should initialize");

        Self {
            url: config.url().map(ToOwned::to_owned),
            client,
        }
    }

    /// Resolves the pool. Always returns a non-empty list.
    pub async fn fetch(&self) -> Vec<String> {
        let Some(url) = self.url.as_deref() else {
            return default_words();
        };

        match self.download(url).await {
            Ok(body) => {
                let words = parse_word_list(&body);

                if words.is_empty() {
                    warn!(url, "word list body had no usable words, using the built-in list");
                    default_words()
                } else {
                    debug!(url, count = words.len(), "fetched word list");
                    words
                }
            }
            Err(error) => {
                warn!(url, %error, "could not fetch the word list, using the built-in list");
                default_words()
            }
        }
    }

    async fn download(&self, url: &str) -> reqwest::Result<String> {
        self.client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

fn default_words() -> Vec<String> {
    DEFAULT_WORDS.iter().map(|s| (*s).to_owned()).collect()
}

/// Normalizes line endings, trims, and drops blank lines and
/// `//`-prefixed comments.
fn parse_word_list(body: &str) -> Vec<String> {
    body.replace("\r\n", "\n")
        .replace('\r', "\n")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .map(ToOwned::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parsing_normalizes_endings_and_drops_noise() {
        let body = "Alpha\r\nBeta\r// a comment\n\n  Gamma  \n//another\n";

        assert_eq!(parse_word_list(body), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn default_list_has_54_entries() {
        assert_eq!(default_words().len(), 54);
    }

    #[tokio::test]
    async fn no_url_yields_the_default_list() {
        let words = WordsList::new(&WordsConfig::default());

        assert_eq!(words.fetch().await, default_words());
    }

    #[tokio::test]
    async fn unreachable_url_falls_back() {
        let words = WordsList {
            url: Some("http://127.0.0.1:1/words.txt".to_owned()),
            client: reqwest::Client::new(),
        };

        assert_eq!(words.fetch().await, default_words());
    }
}
