use serde::Serialize;

/// One line of player-facing log output, tagged by the kind of event it reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum OutputBlock {
    Title(String),
    Text(String),
    Combat(String),
    Loot(String),
    Xp(String),
    Heal(String),
    Warning(String),
    /// The front end should wipe its log.
    Clear,
}

impl OutputBlock {
    pub fn text(&self) -> &str {
        match self {
            OutputBlock::Title(s)
            | OutputBlock::Text(s)
            | OutputBlock::Combat(s)
            | OutputBlock::Loot(s)
            | OutputBlock::Xp(s)
            | OutputBlock::Heal(s)
            | OutputBlock::Warning(s) => s,
            OutputBlock::Clear => "",
        }
    }
}

#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, s: String, make: fn(String) -> OutputBlock) {
        if !s.trim().is_empty() {
            self.blocks.push(make(s));
        }
    }

    pub fn title(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Title);
    }

    pub fn say(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Text);
    }

    pub fn combat(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Combat);
    }

    pub fn loot(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Loot);
    }

    pub fn xp(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Xp);
    }

    pub fn heal(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Heal);
    }

    pub fn warn(&mut self, s: impl Into<String>) {
        self.push(s.into(), OutputBlock::Warning);
    }

    /// Everything already in this output is superseded by the clear.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.blocks.push(OutputBlock::Clear);
    }

    /// True if any line contains `needle`. Mostly useful in tests.
    pub fn contains(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| b.text().contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_dropped() {
        let mut out = Output::new();
        out.say("   ");
        out.combat("hit");
        assert_eq!(out.blocks, vec![OutputBlock::Combat("hit".into())]);
    }

    #[test]
    fn clear_discards_earlier_lines() {
        let mut out = Output::new();
        out.say("> clear");
        out.clear();
        assert_eq!(out.blocks, vec![OutputBlock::Clear]);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json = serde_json::to_value(OutputBlock::Loot("+10 Gold".into())).unwrap();
        assert_eq!(json["kind"], "loot");
        assert_eq!(json["text"], "+10 Gold");
    }
}
