//! `#page?key=value` routes.

use leadflow_shared::types::{FundraiserId, LeadId};
use serde::{Deserialize, Serialize};

use super::encoding::{decode, encode};
use super::page::Page;

/// Recognised query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteParams {
    /// Record id for detail pages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Lead a new fundraiser is created for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_id: Option<String>,
    /// Fundraiser being edited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_id: Option<String>,
}

/// A page and its parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Page to show.
    pub page: Page,
    /// Query parameters.
    #[serde(default)]
    pub params: RouteParams,
}

impl Route {
    /// Route to a page without parameters.
    #[must_use]
    pub fn to(page: Page) -> Self {
        Self {
            page,
            params: RouteParams::default(),
        }
    }

    /// The dashboard.
    #[must_use]
    pub fn dashboard() -> Self {
        Self::to(Page::Dashboard)
    }

    /// Detail page of a lead.
    #[must_use]
    pub fn lead_detail(id: &LeadId) -> Self {
        Self::with_id(Page::LeadDetail, id.as_str())
    }

    /// Detail page of a fundraiser.
    #[must_use]
    pub fn fundraiser_detail(id: &FundraiserId) -> Self {
        Self::with_id(Page::FundraiserDetail, id.as_str())
    }

    /// Form creating a fundraiser for a lead.
    #[must_use]
    pub fn fundraiser_create(lead_id: &LeadId) -> Self {
        Self {
            page: Page::FundraiserCreate,
            params: RouteParams {
                lead_id: Some(lead_id.to_string()),
                ..RouteParams::default()
            },
        }
    }

    /// Form editing a fundraiser.
    #[must_use]
    pub fn fundraiser_edit(fund_id: &FundraiserId) -> Self {
        Self {
            page: Page::FundraiserCreate,
            params: RouteParams {
                fund_id: Some(fund_id.to_string()),
                ..RouteParams::default()
            },
        }
    }

    fn with_id(page: Page, id: &str) -> Self {
        Self {
            page,
            params: RouteParams {
                id: Some(id.to_string()),
                ..RouteParams::default()
            },
        }
    }

    /// Parses a fragment such as `#lead_detail?id=lead_1`.
    ///
    /// The leading `#` is optional. An empty or unknown page is the dashboard;
    /// unknown query keys and empty values are ignored.
    #[must_use]
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        let (name, query) = fragment.split_once('?').unwrap_or((fragment, ""));

        let mut params = RouteParams::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);
            if value.is_empty() {
                continue;
            }
            match decode(key).as_str() {
                "id" => params.id = Some(value),
                "leadId" => params.lead_id = Some(value),
                "fundId" => params.fund_id = Some(value),
                _ => {}
            }
        }

        Self {
            page: Page::from_name(&decode(name)),
            params,
        }
    }

    /// Builds the fragment, without the leading `#`.
    #[must_use]
    pub fn to_fragment(&self) -> String {
        let pairs: Vec<String> = [
            ("id", &self.params.id),
            ("leadId", &self.params.lead_id),
            ("fundId", &self.params.fund_id),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={}", encode(v))))
        .collect();

        if pairs.is_empty() {
            self.page.as_str().to_string()
        } else {
            format!("{}?{}", self.page, pairs.join("&"))
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.to_fragment())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", Page::Dashboard)]
    #[case("#", Page::Dashboard)]
    #[case("#leads", Page::Leads)]
    #[case("leads", Page::Leads)]
    #[case("#nowhere", Page::Dashboard)]
    #[case("#admin", Page::Admin)]
    #[case("#fundraiser_detail?id=fund_1", Page::FundraiserDetail)]
    fn test_parse_page(#[case] fragment: &str, #[case] page: Page) {
        assert_eq!(Route::parse(fragment).page, page);
    }

    #[test]
    fn test_parse_params() {
        let route = Route::parse("#fundraiser_create?leadId=lead%5F1&fundId=&x=1");
        assert_eq!(route.params.lead_id.as_deref(), Some("lead_1"));
        assert_eq!(route.params.fund_id, None);
        assert_eq!(route.params.id, None);
    }

    #[test]
    fn test_fragment_round_trip() {
        let route = Route::lead_detail(&LeadId::from("lead one&two"));
        assert_eq!(route.to_fragment(), "lead_detail?id=lead+one%26two");
        assert_eq!(Route::parse(&route.to_string()), route);

        assert_eq!(Route::dashboard().to_string(), "#dashboard");
    }
}
