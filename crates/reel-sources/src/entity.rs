//! Brand name to web domain resolution.
//!
//! Logo providers are keyed by domain, while narration only knows a brand
//! name ("OpenAI", "Nvidia"). The directory maps well-known names and their
//! aliases to canonical domains and can also spot a known brand in free
//! text, which the pipeline uses when the caller supplies no entity.

/// A known brand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityEntry {
    /// Display name, as it should appear in queries
    pub name: String,
    /// Domain used for logo lookups
    pub domain: String,
    /// Lowercase aliases, the canonical name included
    pub aliases: Vec<String>,
    /// Whether aliases are distinctive enough to detect in free text
    pub detectable: bool,
}

impl EntityEntry {
    pub fn new(name: &str, domain: &str, aliases: &[&str]) -> Self {
        let mut all: Vec<String> = vec![name.to_lowercase()];
        all.extend(aliases.iter().map(|a| a.to_lowercase()));
        all.dedup();
        Self {
            name: name.to_string(),
            domain: domain.to_string(),
            aliases: all,
            detectable: true,
        }
    }

    fn undetectable(mut self) -> Self {
        self.detectable = false;
        self
    }
}

const KNOWN_ENTITIES: &[(&str, &str, &[&str])] = &[
    ("OpenAI", "openai.com", &["chatgpt", "open ai"]),
    ("Google", "google.com", &["alphabet", "youtube"]),
    ("DeepMind", "deepmind.google", &["google deepmind"]),
    ("Microsoft", "microsoft.com", &["copilot"]),
    ("Apple", "apple.com", &["iphone"]),
    ("Meta", "meta.com", &["facebook", "instagram", "whatsapp"]),
    ("Amazon", "amazon.com", &["aws"]),
    ("Nvidia", "nvidia.com", &[]),
    ("Tesla", "tesla.com", &[]),
    ("SpaceX", "spacex.com", &["starlink"]),
    ("Anthropic", "anthropic.com", &["claude"]),
    ("Samsung", "samsung.com", &[]),
    ("Intel", "intel.com", &[]),
    ("AMD", "amd.com", &[]),
    ("Qualcomm", "qualcomm.com", &[]),
    ("IBM", "ibm.com", &[]),
    ("Huawei", "huawei.com", &[]),
    ("Xiaomi", "mi.com", &[]),
    ("TikTok", "tiktok.com", &["bytedance"]),
    ("Netflix", "netflix.com", &[]),
    ("Spotify", "spotify.com", &[]),
    ("Uber", "uber.com", &[]),
    ("Sony", "sony.com", &["playstation"]),
    ("Oracle", "oracle.com", &[]),
    ("Adobe", "adobe.com", &[]),
    ("Salesforce", "salesforce.com", &[]),
    ("Mistral AI", "mistral.ai", &["mistral"]),
    ("DeepSeek", "deepseek.com", &[]),
    ("Perplexity", "perplexity.ai", &[]),
];

/// Lookup table of known brands.
#[derive(Debug, Clone)]
pub struct EntityDirectory {
    entries: Vec<EntityEntry>,
}

impl Default for EntityDirectory {
    fn default() -> Self {
        let mut entries: Vec<EntityEntry> = KNOWN_ENTITIES
            .iter()
            .map(|(name, domain, aliases)| EntityEntry::new(name, domain, aliases))
            .collect();
        // "X" is too short to spot in prose but still resolves when given directly
        entries.push(EntityEntry::new("X", "x.com", &["twitter"]).undetectable());
        Self { entries }
    }
}

impl EntityDirectory {
    /// Build a directory from explicit entries.
    pub fn new(entries: Vec<EntityEntry>) -> Self {
        Self { entries }
    }

    /// Find the entry for a name or alias.
    pub fn lookup(&self, name: &str) -> Option<&EntityEntry> {
        let key = name.trim().to_lowercase();
        self.entries.iter().find(|e| e.aliases.iter().any(|a| *a == key))
    }

    /// Resolve a brand name to the domain its logo is served under.
    ///
    /// Inputs that already look like a domain are returned as-is. Unknown
    /// names fall back to `<slug>.com`.
    pub fn domain_for(&self, name: &str) -> Option<String> {
        let trimmed = name.trim().to_lowercase();
        if trimmed.is_empty() {
            return None;
        }
        if let Some(entry) = self.lookup(&trimmed) {
            return Some(entry.domain.clone());
        }
        if trimmed.contains('.') && !trimmed.contains(' ') {
            return Some(trimmed);
        }

        let slug: String = trimmed.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if slug.is_empty() {
            None
        } else {
            Some(format!("{}.com", slug))
        }
    }

    /// Spot the earliest known brand mentioned in `text`.
    ///
    /// Matches are whole words and must be capitalised in the source text, so
    /// common nouns that double as brand names ("meta", "apple") are ignored.
    pub fn detect(&self, text: &str) -> Option<&EntityEntry> {
        let lower = text.to_lowercase();
        // Lowercasing can change byte lengths for non-ASCII text; offsets are
        // only trusted when it did not.
        let aligned = lower.len() == text.len();

        let mut best: Option<(usize, &EntityEntry)> = None;
        for entry in self.entries.iter().filter(|e| e.detectable) {
            for alias in &entry.aliases {
                if let Some(pos) = find_word(&lower, alias) {
                    let capitalised = !aligned
                        || text
                            .get(pos..)
                            .and_then(|rest| rest.chars().next())
                            .map(|c| c.is_uppercase())
                            .unwrap_or(false);
                    if capitalised && best.map_or(true, |(p, _)| pos < p) {
                        best = Some((pos, entry));
                    }
                }
            }
        }
        best.map(|(_, entry)| entry)
    }
}

/// Byte offset of the first whole-word occurrence of `needle` in `haystack`.
fn find_word(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let mut start = 0;
    while let Some(found) = haystack[start..].find(needle) {
        let pos = start + found;
        let end = pos + needle.len();
        let before_ok = haystack[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return Some(pos);
        }
        start = pos + needle.chars().next().map_or(1, char::len_utf8);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_for_known_and_alias() {
        let directory = EntityDirectory::default();
        assert_eq!(directory.domain_for("OpenAI").as_deref(), Some("openai.com"));
        assert_eq!(directory.domain_for(" chatgpt ").as_deref(), Some("openai.com"));
        assert_eq!(directory.domain_for("Twitter").as_deref(), Some("x.com"));
        assert_eq!(directory.domain_for("Xiaomi").as_deref(), Some("mi.com"));
    }

    #[test]
    fn test_domain_for_fallbacks() {
        let directory = EntityDirectory::default();
        assert_eq!(directory.domain_for("hugging.co").as_deref(), Some("hugging.co"));
        assert_eq!(directory.domain_for("Acme Robotics").as_deref(), Some("acmerobotics.com"));
        assert_eq!(directory.domain_for("   "), None);
        assert_eq!(directory.domain_for("¿?"), None);
    }

    #[test]
    fn test_detect_earliest_capitalised_brand() {
        let directory = EntityDirectory::default();
        let found = directory
            .detect("Nvidia supera a Apple como la empresa más valiosa")
            .map(|e| e.name.as_str());
        assert_eq!(found, Some("Nvidia"));

        let found = directory
            .detect("El nuevo modelo de OpenAI sorprende")
            .map(|e| e.name.as_str());
        assert_eq!(found, Some("OpenAI"));
    }

    #[test]
    fn test_detect_ignores_common_nouns_and_partial_words() {
        let directory = EntityDirectory::default();
        assert!(directory.detect("la meta del proyecto es clara").is_none());
        assert!(directory.detect("Metallica anuncia gira").is_none());
        assert!(directory.detect("X anuncia cambios").is_none());
    }
}
