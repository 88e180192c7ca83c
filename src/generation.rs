use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Temperature preset for the low-creativity choice.
pub const TEMPERATURE_LOW: f64 = 0.30;

/// Temperature preset for the high-creativity choice.
pub const TEMPERATURE_HIGH: f64 = 0.95;

/// Output-length cap applied to every request.
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// User-facing creativity selector. Exactly two values; each maps to a
/// fixed sampling temperature preset.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Creativity {
    /// Conservative output (temperature 0.30). Default.
    #[default]
    Low,
    /// Diverse output (temperature 0.95).
    High,
}

impl Creativity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }

    pub fn temperature(&self) -> f64 {
        match self {
            Self::Low => TEMPERATURE_LOW,
            Self::High => TEMPERATURE_HIGH,
        }
    }
}

/// Per-request sampling parameters, in Gemini `generationConfig` wire form.
/// Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl GenerationConfig {
    /// Resolve the fixed parameter bundle for a creativity choice.
    pub fn resolve(choice: Creativity) -> Self {
        Self {
            temperature: choice.temperature(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Harm category in Gemini wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmCategory {
    HarmCategoryHarassment,
    HarmCategoryHateSpeech,
    HarmCategorySexuallyExplicit,
    HarmCategoryDangerousContent,
}

/// Block threshold in Gemini wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

/// One `safetySettings` entry: a category mapped to its block threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

/// The fixed safety policy sent with every request: all four harm
/// categories fully permissive. Never overridden per-call.
pub fn permissive_safety_policy() -> Vec<SafetySetting> {
    [
        HarmCategory::HarmCategoryHarassment,
        HarmCategory::HarmCategoryHateSpeech,
        HarmCategory::HarmCategorySexuallyExplicit,
        HarmCategory::HarmCategoryDangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockNone,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_maps_low_and_high_exactly() {
        let low = GenerationConfig::resolve(Creativity::Low);
        assert_eq!(low.temperature, 0.30);
        assert_eq!(low.max_output_tokens, 2048);

        let high = GenerationConfig::resolve(Creativity::High);
        assert_eq!(high.temperature, 0.95);
        assert_eq!(high.max_output_tokens, 2048);
    }

    #[test]
    fn max_output_tokens_constant_for_all_choices() {
        for choice in [Creativity::Low, Creativity::High] {
            let config = GenerationConfig::resolve(choice);
            assert_eq!(config.max_output_tokens, MAX_OUTPUT_TOKENS);
            assert!(config.temperature == TEMPERATURE_LOW || config.temperature == TEMPERATURE_HIGH);
        }
    }

    #[test]
    fn generation_config_serializes_in_wire_form() {
        let json = serde_json::to_value(GenerationConfig::resolve(Creativity::Low)).unwrap();
        assert_eq!(json["temperature"], 0.30);
        assert_eq!(json["maxOutputTokens"], 2048);
    }

    #[test]
    fn safety_policy_covers_all_four_categories_with_block_none() {
        let policy = permissive_safety_policy();
        assert_eq!(policy.len(), 4);
        assert!(
            policy
                .iter()
                .all(|s| s.threshold == HarmBlockThreshold::BlockNone)
        );

        let json = serde_json::to_value(&policy).unwrap();
        let categories: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["category"].as_str().unwrap())
            .collect();
        assert_eq!(
            categories,
            [
                "HARM_CATEGORY_HARASSMENT",
                "HARM_CATEGORY_HATE_SPEECH",
                "HARM_CATEGORY_SEXUALLY_EXPLICIT",
                "HARM_CATEGORY_DANGEROUS_CONTENT",
            ]
        );
        for setting in json.as_array().unwrap() {
            assert_eq!(setting["threshold"], "BLOCK_NONE");
        }
    }

    #[test]
    fn creativity_deserializes_lowercase() {
        let choice: Creativity = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(choice, Creativity::High);
        assert_eq!(Creativity::default(), Creativity::Low);
    }
}
