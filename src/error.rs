use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("no global `window` exists")]
    MissingWindow,
    #[error("window has no `document`")]
    MissingDocument,
    #[error("no canvas element with id `{0}`")]
    MissingCanvas(String),
    #[error("2d rendering context unavailable")]
    ContextUnavailable,
    #[error("javascript error: {0}")]
    Js(String),
    #[error("invalid value {value:?} for setting `{name}`")]
    InvalidSetting { name: String, value: String },
    #[error("fire pool is full ({capacity} live fires)")]
    FirePoolFull { capacity: usize },
}

impl GameError {
    pub(crate) fn invalid(name: &str, value: &str) -> Self {
        Self::InvalidSetting {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = GameError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_setting_names_the_setting() {
        let err = GameError::invalid("data-width", "wide");
        assert_eq!(
            err.to_string(),
            "invalid value \"wide\" for setting `data-width`"
        );
    }

    #[test]
    fn full_pool_reports_capacity() {
        let err = GameError::FirePoolFull { capacity: 20 };
        assert_eq!(err.to_string(), "fire pool is full (20 live fires)");
    }
}
