//! Query-string options for batch requests.

use url::Url;

/// A single query parameter applied to an outgoing request URL.
///
/// Options are applied in the order given and always append, so passing the
/// same option twice sends both values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOption {
    /// `complete=<bool>`: only completed batches.
    Complete(bool),
    /// `status=<value>`: only batches in this status.
    Status(String),
    /// `offset=<n>`: pagination start.
    Offset(u32),
    /// `limit=<n>`: page size.
    Limit(u32),
}

impl ListOption {
    pub fn name(&self) -> &'static str {
        match self {
            ListOption::Complete(_) => "complete",
            ListOption::Status(_) => "status",
            ListOption::Offset(_) => "offset",
            ListOption::Limit(_) => "limit",
        }
    }

    pub fn value(&self) -> String {
        match self {
            ListOption::Complete(b) => b.to_string(),
            ListOption::Status(s) => s.clone(),
            ListOption::Offset(n) | ListOption::Limit(n) => n.to_string(),
        }
    }

    pub fn apply(&self, url: &mut Url) {
        url.query_pairs_mut().append_pair(self.name(), &self.value());
    }
}

pub fn complete(complete: bool) -> ListOption {
    ListOption::Complete(complete)
}

pub fn status(status: impl Into<String>) -> ListOption {
    ListOption::Status(status.into())
}

pub fn offset(offset: u32) -> ListOption {
    ListOption::Offset(offset)
}

pub fn limit(limit: u32) -> ListOption {
    ListOption::Limit(limit)
}

/// Apply `opts` to `url` in order.
pub(crate) fn apply_all(url: &mut Url, opts: &[ListOption]) {
    for opt in opts {
        opt.apply(url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://api.brewfather.app/v1/batches").unwrap()
    }

    #[test]
    fn encodes_each_option() {
        let mut url = base();
        apply_all(
            &mut url,
            &[complete(true), status("Fermenting"), offset(5), limit(10)],
        );
        assert_eq!(
            url.query(),
            Some("complete=true&status=Fermenting&offset=5&limit=10")
        );
    }

    #[test]
    fn repeated_options_append() {
        let mut url = base();
        apply_all(&mut url, &[status("Planning"), status("Brewing")]);
        let statuses: Vec<_> = url
            .query_pairs()
            .filter(|(k, _)| k == "status")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(statuses, ["Planning", "Brewing"]);
    }

    #[test]
    fn status_values_are_escaped() {
        let mut url = base();
        status("In progress & more").apply(&mut url);
        assert_eq!(url.query(), Some("status=In+progress+%26+more"));
    }

    #[test]
    fn no_options_leaves_url_untouched() {
        let mut url = base();
        apply_all(&mut url, &[]);
        assert_eq!(url.as_str(), "https://api.brewfather.app/v1/batches");
    }
}
