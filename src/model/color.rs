// src/model/color.rs

use serde::Deserialize;

/// Status icon of a job or run, named after the image it is drawn with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BallColor {
    Red,
    Yellow,
    Blue,
    #[default]
    Grey,
    Disabled,
    Aborted,
    #[serde(rename = "nobuilt")]
    NotBuilt,
}

impl BallColor {
    pub fn name(self) -> &'static str {
        match self {
            BallColor::Red => "red",
            BallColor::Yellow => "yellow",
            BallColor::Blue => "blue",
            BallColor::Grey => "grey",
            BallColor::Disabled => "disabled",
            BallColor::Aborted => "aborted",
            BallColor::NotBuilt => "nobuilt",
        }
    }

    /// File name of the icon, e.g. `blue.png`.
    pub fn image(self) -> String {
        format!("{}.png", self.name())
    }
}
