//! Symptom advisory table
//!
//! Exact, case-insensitive match on a fixed set of symptom phrases.
//! No fuzzy matching and no synonyms.

use std::collections::HashMap;
use lazy_static::lazy_static;

lazy_static! {
    static ref ADVICE: HashMap<&'static str, &'static str> = HashMap::from([
        ("headache", "Drink plenty of water and rest. If persistent, consult a doctor."),
        ("fever", "Stay hydrated and take paracetamol. See a doctor if fever lasts more than 2 days."),
        ("nauseous", "Eat light meals and rest. Ginger tea may help."),
        ("back pain", "Apply a hot compress and avoid heavy lifting. Visit orthopedics if severe."),
        ("stomach ache", "Try bland foods and stay hydrated. Avoid spicy items."),
        ("cough", "Drink warm fluids and avoid cold drinks."),
        ("sore throat", "Gargle with salt water and drink warm tea."),
        ("dizzy", "Sit or lie down, drink water, and avoid sudden movements."),
        ("chest pain", "This could be serious — please seek immediate medical help."),
        ("cold", "Rest, stay hydrated, and take steam inhalation."),
        ("flu", "Rest, fluids, and monitor temperature regularly."),
        ("fatigue", "Ensure good sleep, eat nutritious meals, and reduce stress."),
    ]);
}

/// Advice for a known symptom
pub fn advice_for(symptom: &str) -> Option<&'static str> {
    ADVICE.get(symptom.to_lowercase().as_str()).copied()
}

/// Advice for any symptom; unknown ones get the generic fallback naming the original text
pub fn advise(symptom: &str) -> String {
    match advice_for(symptom) {
        Some(advice) => advice.to_string(),
        None => format!("Please consult a physician for advice on {symptom}."),
    }
}

/// Number of known symptoms
pub fn known_symptoms() -> usize {
    ADVICE.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_symptom() {
        assert_eq!(
            advise("fever"),
            "Stay hydrated and take paracetamol. See a doctor if fever lasts more than 2 days."
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(advise("Headache"), advise("headache"));
        assert_eq!(advise("BACK PAIN"), advise("back pain"));
        assert!(advice_for("Sore Throat").is_some());
    }

    #[test]
    fn test_unknown_symptom_falls_back() {
        assert_eq!(advise("Rash"), "Please consult a physician for advice on Rash.");
        assert_eq!(advice_for("headaches"), None);
    }

    #[test]
    fn test_table_size() {
        assert_eq!(known_symptoms(), 12);
    }
}
