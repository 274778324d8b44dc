/// Static `username:pin` allowlist, parsed once at start-up.
#[derive(Clone, Debug, Default)]
pub struct PinDirectory {
    entries: Vec<(String, String)>,
}

impl PinDirectory {
    /// Parses `alice:1234,bob:9999`. Malformed pairs and empty pins are skipped.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(',')
            .filter_map(|pair| {
                let (user, pin) = pair.split_once(':')?;
                let (user, pin) = (user.trim(), pin.trim());
                if pin.is_empty() || pin.contains(':') {
                    return None;
                }
                Some((user.to_string(), pin.to_string()))
            })
            .collect();

        Self { entries }
    }

    /// Returns the user owning `pin`.
    pub fn authenticate(&self, pin: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, valid)| valid == pin)
            .map(|(user, _)| user.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
