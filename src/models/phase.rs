use serde::{Deserialize, Serialize};

/// Preset cycle phases shown in the calendar legend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
  Menstrual,
  Follicular,
  Ovulatory,
  Luteal,
}

impl Phase {
  pub const ALL: [Phase; 4] = [
    Phase::Menstrual,
    Phase::Follicular,
    Phase::Ovulatory,
    Phase::Luteal,
  ];

  pub fn as_str(&self) -> &'static str {
    match self {
      Phase::Menstrual => "Menstrual",
      Phase::Follicular => "Follicular",
      Phase::Ovulatory => "Ovulatory",
      Phase::Luteal => "Luteal",
    }
  }
}

impl std::fmt::Display for Phase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Phase {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Phase::ALL
      .into_iter()
      .find(|p| p.as_str() == s)
      .ok_or_else(|| format!("Unknown phase: {}", s))
  }
}

/// How a free-text phase label reads against the preset legend.
/// Display only: insights always group by the raw label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "label", rename_all = "snake_case")]
pub enum PhaseLabel {
  Unset,
  Preset(Phase),
  Custom(String),
}

impl PhaseLabel {
  pub fn classify(text: &str) -> Self {
    if text.is_empty() {
      return PhaseLabel::Unset;
    }
    match text.parse::<Phase>() {
      Ok(phase) => PhaseLabel::Preset(phase),
      Err(_) => PhaseLabel::Custom(text.to_string()),
    }
  }

  pub fn is_custom(&self) -> bool {
    matches!(self, PhaseLabel::Custom(_))
  }
}
