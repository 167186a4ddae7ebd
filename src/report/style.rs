/// Decorations around the fixed report text. The words never change, only
/// the glyphs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Style {
    #[default]
    Decorated,
    Plain,
}

pub struct Glyphs {
    pub header: &'static str,
    pub no_issues: &'static str,
    pub issue: &'static str,
    pub recommendations: &'static str,
    pub advice: &'static str,
    pub top_cpu: &'static str,
    pub top_ram: &'static str,
}

const DECORATED: Glyphs = Glyphs {
    header: "🧠 Advanced AI Analysis:",
    no_issues: "✔ No critical performance issues detected",
    issue: "- ⚠️ ",
    recommendations: "💡 Recommendations:",
    advice: "- ✅ ",
    top_cpu: "🔥 Top CPU-consuming processes:",
    top_ram: "🧮 Top RAM-consuming processes:",
};

const PLAIN: Glyphs = Glyphs {
    header: "Analysis:",
    no_issues: "OK: No critical performance issues detected",
    issue: "- [!] ",
    recommendations: "Recommendations:",
    advice: "- [+] ",
    top_cpu: "Top CPU-consuming processes:",
    top_ram: "Top RAM-consuming processes:",
};

impl Style {
    pub fn from_plain_flag(plain: bool) -> Self {
        if plain { Style::Plain } else { Style::Decorated }
    }

    pub fn glyphs(self) -> &'static Glyphs {
        match self {
            Style::Decorated => &DECORATED,
            Style::Plain => &PLAIN,
        }
    }
}
