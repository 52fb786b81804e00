//! Ordered relay endpoints and candidate construction for the fetcher.

use crate::fetch::FetchSource;
use crate::urls::{encode_component, host_of};

const RAW_PLACEHOLDER: &str = "{url}";
const ENCODED_PLACEHOLDER: &str = "{url_encoded}";

/// One relay in the chain.
///
/// The template embeds the target with `{url}` (as-is) or `{url_encoded}`
/// (percent-encoded, for relays taking it as a query value). A template with
/// neither placeholder has the target appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxyEndpoint {
    position: usize,
    template: String,
}

impl ProxyEndpoint {
    /// Builds the relay URL that fetches `target` through this endpoint.
    #[must_use]
    pub fn relay_url(&self, target: &str) -> String {
        if self.template.contains(ENCODED_PLACEHOLDER) {
            self.template
                .replace(ENCODED_PLACEHOLDER, &encode_component(target))
        } else if self.template.contains(RAW_PLACEHOLDER) {
            self.template.replace(RAW_PLACEHOLDER, target)
        } else {
            format!("{}{target}", self.template)
        }
    }

    /// Relay hostname for log lines and error summaries.
    #[must_use]
    pub fn host(&self) -> String {
        host_of(&self.relay_url("")).unwrap_or_else(|| self.template.clone())
    }
}

/// A concrete URL to try and the source it represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub source: FetchSource,
    pub url: String,
}

/// Relay endpoints in fallback order.
#[derive(Debug, Clone, Default)]
pub struct ProxyChain {
    endpoints: Vec<ProxyEndpoint>,
}

impl ProxyChain {
    pub fn new<I, S>(templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let endpoints = templates
            .into_iter()
            .enumerate()
            .map(|(position, template)| ProxyEndpoint {
                position,
                template: template.into(),
            })
            .collect();
        Self { endpoints }
    }

    #[must_use]
    pub fn endpoints(&self) -> &[ProxyEndpoint] {
        &self.endpoints
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    /// Relay URL for `target` through the endpoint at `index`.
    #[must_use]
    pub fn relay_url(&self, index: usize, target: &str) -> Option<String> {
        self.endpoints.get(index).map(|e| e.relay_url(target))
    }

    /// Every source to try for `target`: the origin itself first when
    /// `allow_direct` is set, then each relay in configured order.
    #[must_use]
    pub fn candidates(&self, target: &str, allow_direct: bool) -> Vec<Candidate> {
        let direct = allow_direct.then(|| Candidate {
            source: FetchSource::Direct,
            url: target.to_owned(),
        });

        direct
            .into_iter()
            .chain(self.endpoints.iter().map(|endpoint| Candidate {
                source: FetchSource::Proxy {
                    index: endpoint.position,
                    host: endpoint.host(),
                },
                url: endpoint.relay_url(target),
            }))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TARGET: &str = "https://www.wilmingtonchamber.org/list/search?q=design&c=&sa=False";

    fn chain() -> ProxyChain {
        ProxyChain::new([
            "https://corsproxy.io/?{url}",
            "https://api.allorigins.win/raw?url={url_encoded}",
            "https://relay.example/fetch/",
        ])
    }

    #[test]
    fn raw_placeholder_embeds_target_verbatim() {
        assert_eq!(
            chain().relay_url(0, TARGET).as_deref(),
            Some("https://corsproxy.io/?https://www.wilmingtonchamber.org/list/search?q=design&c=&sa=False")
        );
    }

    #[test]
    fn encoded_placeholder_percent_encodes_target() {
        assert_eq!(
            chain().relay_url(1, TARGET).as_deref(),
            Some("https://api.allorigins.win/raw?url=https%3A%2F%2Fwww.wilmingtonchamber.org%2Flist%2Fsearch%3Fq%3Ddesign%26c%3D%26sa%3DFalse")
        );
    }

    #[test]
    fn bare_template_concatenates() {
        assert_eq!(
            chain().relay_url(2, "https://a.example/x").as_deref(),
            Some("https://relay.example/fetch/https://a.example/x")
        );
    }

    #[test]
    fn relay_url_out_of_range_is_none() {
        assert_eq!(chain().relay_url(3, TARGET), None);
    }

    #[test]
    fn host_names_relay() {
        let chain = chain();
        let hosts: Vec<String> = chain.endpoints().iter().map(ProxyEndpoint::host).collect();
        assert_eq!(hosts, ["corsproxy.io", "api.allorigins.win", "relay.example"]);
    }

    #[test]
    fn candidates_put_direct_first_then_config_order() {
        let candidates = chain().candidates(TARGET, true);
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].source, FetchSource::Direct);
        assert_eq!(candidates[0].url, TARGET);
        let indices: Vec<usize> = candidates[1..]
            .iter()
            .map(|c| match c.source {
                FetchSource::Proxy { index, .. } => index,
                FetchSource::Direct => usize::MAX,
            })
            .collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn candidates_without_direct() {
        let candidates = chain().candidates(TARGET, false);
        assert_eq!(candidates.len(), 3);
        assert!(candidates
            .iter()
            .all(|c| matches!(c.source, FetchSource::Proxy { .. })));
    }

    #[test]
    fn empty_chain_with_direct_only() {
        let candidates = ProxyChain::default().candidates(TARGET, true);
        assert_eq!(candidates.len(), 1);
        assert!(ProxyChain::default().candidates(TARGET, false).is_empty());
    }
}
