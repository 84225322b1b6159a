use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("{endpoint} request failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} returned HTTP {status}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("{endpoint} returned an unreadable body: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{0} returned no translations")]
    EmptyTranslation(&'static str),
}

impl UpstreamError {
    // reqwest errors embed the request URL, which carries the API key
    pub(crate) fn transport(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Transport {
            endpoint,
            source: source.without_url(),
        }
    }

    pub(crate) fn decode(endpoint: &'static str, source: reqwest::Error) -> Self {
        Self::Decode {
            endpoint,
            source: source.without_url(),
        }
    }
}
