//! Rule-based text and typing matching against a [`Rubric`].

use super::rubric::StructuralRule;
use super::{Rubric, SemanticAnalysis, TypingMetrics};

/// Lowercases text and strips Portuguese diacritics so that
/// "Critério" and "criterio" compare equal.
pub fn fold_text(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'â' | 'ã' | 'ä' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'í' | 'ì' | 'î' | 'ï' => 'i',
            'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
            'ú' | 'ù' | 'û' | 'ü' => 'u',
            'ç' => 'c',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

fn word_count(text: &str) -> usize {
    text.split_whitespace()
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .count()
}

impl Rubric {
    /// Scores free text (and optional typing telemetry) against every archetype.
    pub fn analyze(&self, text: &str, typing: Option<&TypingMetrics>) -> SemanticAnalysis {
        let folded = fold_text(text);
        let words = word_count(&folded);
        let mut analysis = SemanticAnalysis::empty();

        for (persona, rules) in &self.personas {
            for keyword in &rules.keywords {
                if folded.contains(&keyword.folded) {
                    analysis.add(*persona, 1.0, format!("keyword:{}", keyword.display));
                }
            }

            for rule in &rules.structural {
                match rule {
                    StructuralRule::Pattern {
                        name,
                        regex,
                        min_matches,
                        weight,
                    } => {
                        if regex.find_iter(&folded).take(*min_matches).count() >= *min_matches {
                            analysis.add(*persona, *weight, format!("pattern:{}", name));
                        }
                    }
                    StructuralRule::Concise {
                        name,
                        max_words,
                        weight,
                    } => {
                        if (1..=*max_words).contains(&words) {
                            analysis.add(*persona, *weight, format!("pattern:{}", name));
                        }
                    }
                }
            }
        }

        if let Some(metrics) = typing {
            self.apply_typing(metrics, &mut analysis);
        }

        tracing::trace!(
            words,
            indicators = analysis.indicators.len(),
            "Analyzed answer text"
        );
        analysis
    }

    fn apply_typing(&self, metrics: &TypingMetrics, analysis: &mut SemanticAnalysis) {
        let ratio = metrics.backspace_ratio();

        let heavy = &self.typing.correction_heavy;
        if ratio >= heavy.min_backspace_ratio || metrics.hesitation_count >= heavy.min_hesitations {
            analysis.add(heavy.persona, heavy.weight, "typing:correction_heavy".to_string());
        }

        let fluent = &self.typing.fluent;
        if metrics.char_count > 0
            && metrics.average_speed >= fluent.min_chars_per_second
            && metrics.pause_count <= fluent.max_pauses
        {
            analysis.add(fluent.persona, fluent.weight, "typing:fluent".to_string());
        }

        let deliberate = &self.typing.deliberate;
        if metrics.pause_count >= deliberate.min_pauses && ratio < deliberate.max_backspace_ratio {
            analysis.add(
                deliberate.persona,
                deliberate.weight,
                "typing:deliberate".to_string(),
            );
        }
    }
}
