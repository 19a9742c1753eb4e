/// A user supplied board selection token.
///
/// Either `boardname:configname` for in-tree boards, or a path to an
/// out-of-tree configuration directory (`../custom/myboard/configs/nsh`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSelector {
    raw: String,
    board: String,
    config: String,
}

impl BoardSelector {
    /// Split a selector into its board and config parts.
    ///
    /// With a colon the parts are taken around the first colon. Without one
    /// the first two `/` components are used, which rarely names a real
    /// in-tree board but keeps path selectors on the same resolution path.
    pub fn parse(raw: &str) -> Self {
        let (board, config) = match raw.split_once(':') {
            Some((board, config)) => (board.to_string(), config.to_string()),
            None => {
                let mut parts = raw.split('/');
                let board = parts.next().unwrap_or_default().to_string();
                let config = parts.next().unwrap_or_default().to_string();
                (board, config)
            }
        };

        Self {
            raw: raw.to_string(),
            board,
            config,
        }
    }

    /// The selector exactly as given.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn board(&self) -> &str {
        &self.board
    }

    pub fn config(&self) -> &str {
        &self.config
    }

    /// Whether the selector uses the `board:config` form.
    pub fn is_pair(&self) -> bool {
        self.raw.contains(':')
    }
}

impl std::fmt::Display for BoardSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
