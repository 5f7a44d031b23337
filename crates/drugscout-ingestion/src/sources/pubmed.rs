//! PubMed E-utilities client.
//!
//! Endpoints used:
//!   esearch: https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi
//!   efetch:  https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi

use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Datelike;
use drugscout_common::config::SourcesConfig;
use drugscout_common::sandbox::SandboxClient as Client;
use drugscout_common::{Article, Availability};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;
use tracing::{debug, instrument, warn};

use super::LiteratureOracle;

const ESEARCH_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/esearch.fcgi";
const EFETCH_URL:  &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/efetch.fcgi";

pub struct PubMedClient {
    client: Client,
    api_key: Option<String>,
    email: String,
    tool: String,
}

impl PubMedClient {
    pub fn new(config: &SourcesConfig) -> drugscout_common::Result<Self> {
        Ok(Self {
            client: Client::with_timeout(Duration::from_secs(config.http_timeout_secs))?,
            api_key: config.pubmed_api_key.clone(),
            email: config.contact_email.clone(),
            tool: config.tool_name.clone(),
        })
    }

    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("db", "pubmed".to_string()),
            ("tool", self.tool.clone()),
            ("email", self.email.clone()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }
        params
    }

    /// Search PubMed and return a list of PMIDs.
    #[instrument(skip(self))]
    async fn esearch(&self, query: &str, max: usize) -> anyhow::Result<Vec<String>> {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", max.to_string()));
        params.push(("retmode", "json".to_string()));

        let resp: serde_json::Value = self.client
            .get(ESEARCH_URL)?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let ids = parse_esearch_ids(&resp);
        debug!(?ids, "PubMed esearch returned PMIDs");
        Ok(ids)
    }

    /// Fetch PubMed XML for a list of PMIDs and parse into articles.
    #[instrument(skip(self))]
    async fn efetch(&self, pmids: &[String]) -> anyhow::Result<Vec<Article>> {
        if pmids.is_empty() {
            return Ok(vec![]);
        }

        let mut params = self.base_params();
        params.push(("id", pmids.join(",")));
        params.push(("retmode", "xml".to_string()));

        let xml = self.client
            .get(EFETCH_URL)?
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(parse_pubmed_xml(&xml, chrono::Utc::now().year()))
    }
}

#[async_trait]
impl LiteratureOracle for PubMedClient {
    async fn search(&self, query: &str, limit: usize) -> Availability<Vec<String>> {
        Availability::from_result("pubmed", self.esearch(query, limit).await)
    }

    async fn fetch_articles(&self, ids: &[String]) -> Availability<Vec<Article>> {
        Availability::from_result("pubmed", self.efetch(ids).await)
    }
}

fn parse_esearch_ids(resp: &serde_json::Value) -> Vec<String> {
    resp["esearchresult"]["idlist"]
        .as_array()
        .map(|ids| ids.iter().filter_map(|v| v.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

fn medline_year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(19|20)\d{2}").expect("static regex"))
}

/// Candidate publication years seen inside one article, by source element.
#[derive(Default)]
struct YearCandidates {
    journal_issue: Option<i32>,
    medline_date: Option<i32>,
    article_date: Option<i32>,
}

impl YearCandidates {
    /// Journal issue year first, then MedlineDate, then the online-first ArticleDate.
    /// Years after `current_year` are discarded.
    fn resolve(&self, current_year: i32) -> Option<i32> {
        [self.journal_issue, self.medline_date, self.article_date]
            .into_iter()
            .flatten()
            .find(|y| *y <= current_year)
    }
}

struct ArticleBuilder {
    pmid: Option<String>,
    title: String,
    abstract_parts: Vec<String>,
    years: YearCandidates,
}

impl ArticleBuilder {
    fn new() -> Self {
        Self { pmid: None, title: String::new(), abstract_parts: vec![], years: YearCandidates::default() }
    }

    /// Articles with no abstract or no usable year are dropped.
    fn finish(self, current_year: i32) -> Option<Article> {
        let abstract_text = self.abstract_parts.join(" ");
        let year = self.years.resolve(current_year)?;
        if abstract_text.trim().is_empty() {
            return None;
        }
        Some(Article {
            pmid: self.pmid.unwrap_or_default(),
            title: self.title.trim().to_string(),
            abstract_text,
            year: Some(year),
        })
    }
}

fn ends_with(path: &[Vec<u8>], suffix: &[&[u8]]) -> bool {
    path.len() >= suffix.len()
        && path[path.len() - suffix.len()..]
            .iter()
            .zip(suffix)
            .all(|(a, b)| a.as_slice() == *b)
}

fn within(path: &[Vec<u8>], name: &[u8]) -> bool {
    path.iter().any(|p| p.as_slice() == name)
}

/// Parse PubMed efetch XML into articles.
/// Handles the <PubmedArticleSet><PubmedArticle> structure.
pub fn parse_pubmed_xml(xml: &str, current_year: i32) -> Vec<Article> {
    let mut articles = Vec::new();
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut current: Option<ArticleBuilder> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                if name.as_slice() == b"PubmedArticle" {
                    current = Some(ArticleBuilder::new());
                }
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e.unescape().unwrap_or_default().to_string();
                let Some(ref mut a) = current else {
                    buf.clear();
                    continue;
                };

                if ends_with(&path, &[b"MedlineCitation", b"PMID"]) && a.pmid.is_none() {
                    a.pmid = Some(text);
                } else if within(&path, b"ArticleTitle") {
                    if !a.title.is_empty() {
                        a.title.push(' ');
                    }
                    a.title.push_str(&text);
                } else if within(&path, b"AbstractText") {
                    a.abstract_parts.push(text);
                } else if ends_with(&path, &[b"JournalIssue", b"PubDate", b"Year"]) {
                    a.years.journal_issue = text.parse().ok();
                } else if ends_with(&path, &[b"JournalIssue", b"PubDate", b"MedlineDate"]) {
                    a.years.medline_date = medline_year_regex()
                        .find(&text)
                        .and_then(|m| m.as_str().parse().ok());
                } else if ends_with(&path, &[b"ArticleDate", b"Year"]) {
                    a.years.article_date = text.parse().ok();
                }
            }
            Ok(Event::End(ref e)) => {
                path.pop();
                if e.name().as_ref() == b"PubmedArticle" {
                    if let Some(a) = current.take() {
                        match a.finish(current_year) {
                            Some(article) => articles.push(article),
                            None => debug!("Skipping article without abstract or year"),
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!("XML parse error: {}", e);
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    articles
}
