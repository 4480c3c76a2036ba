//! Report section identifiers.

use std::fmt;

/// A named subdivision of the generated report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Introduction,
    Authorization,
    Background,
    Observations,
    Moisture,
    Meteorologist,
    Conclusions,
    Rebuttal,
    Limitations,
    TableOfContents,
    OpeningLetter,
}

impl Section {
    /// Every known section, in report order.
    pub const ALL: [Section; 11] = [
        Section::OpeningLetter,
        Section::TableOfContents,
        Section::Introduction,
        Section::Authorization,
        Section::Background,
        Section::Observations,
        Section::Moisture,
        Section::Meteorologist,
        Section::Conclusions,
        Section::Rebuttal,
        Section::Limitations,
    ];

    /// Resolve a caller-supplied name. Matching ignores case and surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "introduction" => Some(Self::Introduction),
            "authorization" => Some(Self::Authorization),
            "background" => Some(Self::Background),
            "observations" => Some(Self::Observations),
            "moisture" => Some(Self::Moisture),
            "meteorologist" => Some(Self::Meteorologist),
            "conclusions" => Some(Self::Conclusions),
            "rebuttal" => Some(Self::Rebuttal),
            "limitations" => Some(Self::Limitations),
            "tableofcontents" => Some(Self::TableOfContents),
            "openingletter" => Some(Self::OpeningLetter),
            _ => None,
        }
    }

    /// Canonical lookup key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Authorization => "authorization",
            Self::Background => "background",
            Self::Observations => "observations",
            Self::Moisture => "moisture",
            Self::Meteorologist => "meteorologist",
            Self::Conclusions => "conclusions",
            Self::Rebuttal => "rebuttal",
            Self::Limitations => "limitations",
            Self::TableOfContents => "tableofcontents",
            Self::OpeningLetter => "openingletter",
        }
    }

    /// Heading as it appears in the finished report.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Introduction => "Introduction",
            Self::Authorization => "Authorization and Scope of Investigation",
            Self::Background => "Background Information",
            Self::Observations => "Site Observations and Analysis",
            Self::Moisture => "Survey",
            Self::Meteorologist => "Meteorologist Report",
            Self::Conclusions => "Conclusions and Recommendations",
            Self::Rebuttal => "Rebuttal",
            Self::Limitations => "Limitations",
            Self::TableOfContents => "Table of Contents",
            Self::OpeningLetter => "Opening Letter",
        }
    }

    /// Sections whose prompts never reference weather data.
    pub fn skips_weather(&self) -> bool {
        matches!(
            self,
            Self::TableOfContents | Self::OpeningLetter | Self::Introduction
        )
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Whether weather enrichment should be skipped for a raw section name.
///
/// Unknown and missing names still get enrichment.
pub fn section_skips_weather(name: Option<&str>) -> bool {
    name.and_then(Section::from_name)
        .map(|s| s.skips_weather())
        .unwrap_or(false)
}
