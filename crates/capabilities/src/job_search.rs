//! `get_job_postings` — job search backed by SerpApi's Google Jobs engine.

use async_trait::async_trait;
use jobscout_config::JobSearchConfig;
use jobscout_core::Capability;
use serde::Deserialize;
use tracing::{debug, warn};

pub struct JobSearchCapability {
    api_key: Option<String>,
    search_url: String,
    client: reqwest::Client,
}

impl JobSearchCapability {
    pub fn new(config: &JobSearchConfig) -> Self {
        Self {
            api_key: config.serpapi_api_key.clone(),
            search_url: config.search_url.clone(),
            client: reqwest::Client::new(),
        }
    }

    async fn search(&self, query: &str, api_key: &str) -> Result<Vec<JobPosting>, String> {
        let response = self
            .client
            .get(&self.search_url)
            .query(&[("engine", "google_jobs"), ("q", query), ("api_key", api_key)])
            .timeout(std::time::Duration::from_secs(30))
            .send()
            .await
            .map_err(|e| format!("job search request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("job search returned HTTP {status}"));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| format!("could not decode job search response: {e}"))?;

        debug!(results = body.jobs_results.len(), "Job search completed");
        Ok(body.jobs_results.into_iter().map(JobPosting::from).collect())
    }
}

#[async_trait]
impl Capability for JobSearchCapability {
    fn name(&self) -> &str {
        "get_job_postings"
    }

    fn description(&self) -> &str {
        "Useful for when you need to find new AI engineering jobs. \
         The input should be a precise job query, e.g., 'AI engineer jobs in New York'."
    }

    async fn invoke(&self, input: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            return "Error: SERPAPI_API_KEY not set. Cannot perform search.".to_string();
        };

        match self.search(input, api_key).await {
            Ok(jobs) => render_postings(&jobs),
            Err(reason) => {
                warn!(%reason, "Job search failed");
                format!("Error: {reason}")
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs_results: Vec<RawJob>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    title: Option<String>,
    company_name: Option<String>,
    location: Option<String>,
    #[serde(default)]
    related_links: Vec<RelatedLink>,
}

#[derive(Debug, Deserialize)]
struct RelatedLink {
    link: Option<String>,
}

#[derive(Debug)]
struct JobPosting {
    title: String,
    company: String,
    location: String,
    link: String,
}

impl From<RawJob> for JobPosting {
    fn from(raw: RawJob) -> Self {
        let link = raw
            .related_links
            .into_iter()
            .find_map(|l| l.link)
            .unwrap_or_else(|| "No link available".to_string());
        Self {
            title: raw.title.unwrap_or_default(),
            company: raw.company_name.unwrap_or_default(),
            location: raw.location.unwrap_or_default(),
            link,
        }
    }
}

/// Render postings one per numbered entry so the model (and the final
/// email body) can pass them along verbatim.
fn render_postings(jobs: &[JobPosting]) -> String {
    if jobs.is_empty() {
        return "No job postings found for that query.".to_string();
    }

    let mut out = String::new();
    for (i, job) in jobs.iter().enumerate() {
        out.push_str(&format!(
            "{}. {} at {} ({})\n   {}\n",
            i + 1,
            job.title,
            job.company,
            job.location,
            job.link
        ));
    }
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Shape captured from a real google_jobs response, trimmed to the
    // fields the adapter reads.
    const FIXTURE: &str = r#"{
        "search_metadata": {"status": "Success"},
        "jobs_results": [
            {
                "title": "AI Engineer",
                "company_name": "Acme Corp",
                "location": "Austin, TX",
                "via": "via LinkedIn",
                "related_links": [
                    {"link": "https://acme.example/jobs/42", "text": "See job"}
                ]
            },
            {
                "title": "Machine Learning Engineer",
                "company_name": "Initech",
                "location": "Remote"
            }
        ]
    }"#;

    #[test]
    fn parses_serpapi_payload() {
        let parsed: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let jobs: Vec<JobPosting> = parsed.jobs_results.into_iter().map(JobPosting::from).collect();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].title, "AI Engineer");
        assert_eq!(jobs[0].company, "Acme Corp");
        assert_eq!(jobs[0].link, "https://acme.example/jobs/42");
        // Missing related_links falls back to the placeholder.
        assert_eq!(jobs[1].link, "No link available");
    }

    #[test]
    fn renders_postings_line_delimited() {
        let parsed: SearchResponse = serde_json::from_str(FIXTURE).unwrap();
        let jobs: Vec<JobPosting> = parsed.jobs_results.into_iter().map(JobPosting::from).collect();

        let rendered = render_postings(&jobs);
        assert!(rendered.starts_with("1. AI Engineer at Acme Corp (Austin, TX)"));
        assert!(rendered.contains("2. Machine Learning Engineer at Initech (Remote)"));
        assert!(rendered.contains("https://acme.example/jobs/42"));
    }

    #[test]
    fn empty_results_render_placeholder() {
        let parsed: SearchResponse = serde_json::from_str(r#"{"jobs_results": []}"#).unwrap();
        let jobs: Vec<JobPosting> = parsed.jobs_results.into_iter().map(JobPosting::from).collect();
        assert_eq!(render_postings(&jobs), "No job postings found for that query.");
    }

    #[test]
    fn payload_without_results_key_parses() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"search_metadata": {"status": "Success"}}"#).unwrap();
        assert!(parsed.jobs_results.is_empty());
    }

    #[tokio::test]
    async fn missing_api_key_yields_error_string() {
        let capability = JobSearchCapability::new(&JobSearchConfig {
            serpapi_api_key: None,
            ..JobSearchConfig::default()
        });

        let observation = capability.invoke("AI engineer jobs").await;
        assert_eq!(
            observation,
            "Error: SERPAPI_API_KEY not set. Cannot perform search."
        );
    }
}
