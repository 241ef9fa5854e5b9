//! Navigation parameters carried in the page URL.

/// Parameters a board page may be opened with. Values are opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationParams {
    /// Board to open (`?board=...`).
    pub board: Option<String>,
    /// Template to start from.
    pub template: Option<String>,
    /// Board to import.
    pub import: Option<String>,
    /// Collaboration session to join.
    pub session: Option<String>,
    /// Search query.
    pub search: Option<String>,
}

impl NavigationParams {
    /// Parse the query string, then fill gaps from the hash fragment.
    ///
    /// Supports `?board=abc&session=xyz` and `#board=abc`.
    pub fn from_location(search: &str, hash: &str) -> Self {
        let mut params = parse_params(search);
        params.fill_from(parse_params(hash));
        params
    }

    fn fill_from(&mut self, other: NavigationParams) {
        if self.board.is_none() {
            self.board = other.board;
        }
        if self.template.is_none() {
            self.template = other.template;
        }
        if self.import.is_none() {
            self.import = other.import;
        }
        if self.session.is_none() {
            self.session = other.session;
        }
        if self.search.is_none() {
            self.search = other.search;
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == NavigationParams::default()
    }
}

/// Parse parameters from a query string or hash.
pub fn parse_params(s: &str) -> NavigationParams {
    // Remove leading ? or #
    let s = s.trim_start_matches(['?', '#']);

    let mut params = NavigationParams::default();
    for pair in s.split('&') {
        let mut parts = pair.splitn(2, '=');
        if let (Some(key), Some(value)) = (parts.next(), parts.next()) {
            if value.is_empty() {
                continue;
            }
            let value = Some(value.to_string());
            match key {
                "board" => params.board = value,
                "template" => params.template = value,
                "import" => params.import = value,
                "session" => params.session = value,
                "search" => params.search = value,
                _ => {}
            }
        }
    }
    params
}

/// Link that opens the board identified by `board_id`.
pub fn share_url(base: &str, board_id: &str) -> String {
    // Drop any existing query or fragment
    let base = base.split(['?', '#']).next().unwrap_or(base);
    format!("{}?board={}", base, board_id)
}
