use nt_core::FinalArticle;
use serde::{Deserialize, Serialize};

/// The only two response shapes the app ever sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success {
        results: Vec<FinalArticle>,
        #[serde(rename = "queriesUsed", default, skip_serializing_if = "Option::is_none")]
        queries_used: Option<usize>,
        #[serde(rename = "totalArticles", default, skip_serializing_if = "Option::is_none")]
        total_articles: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Error {
        error: String,
        results: Vec<FinalArticle>,
    },
}

impl Envelope {
    pub fn success(results: Vec<FinalArticle>, queries_used: usize) -> Self {
        let total_articles = results.len();
        Envelope::Success {
            results,
            queries_used: Some(queries_used),
            total_articles: Some(total_articles),
            message: None,
        }
    }

    /// A success with no results and an explanation.
    pub fn empty(message: impl Into<String>) -> Self {
        Envelope::Success {
            results: Vec::new(),
            queries_used: None,
            total_articles: None,
            message: Some(message.into()),
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Envelope::Error {
            error: error.into(),
            results: Vec::new(),
        }
    }
}

/// Body of the callable transport: `{"data": payload}`.
#[derive(Debug, Deserialize)]
pub struct CallableRequest {
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Reply of the callable transport: `{"result": envelope}`.
#[derive(Debug, Serialize)]
pub struct CallableResponse {
    pub result: Envelope,
}
