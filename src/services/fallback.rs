// src/services/fallback.rs
//
// Hand-authored advisory replies used whenever the generative provider is
// unavailable. One table serves both the HTTP handler and the client widget
// so the two sides can never drift apart.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Headache,
    Fever,
    Cough,
    ChestPain,
    Emergency,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Headache => "headache",
            Topic::Fever => "fever",
            Topic::Cough => "cough",
            Topic::ChestPain => "chest_pain",
            Topic::Emergency => "emergency",
        }
    }
}

// Order matters: the first group whose keyword appears in the message wins.
const RULES: &[(Topic, &[&str])] = &[
    (Topic::Headache, &["headache", "head pain"]),
    (Topic::Fever, &["fever", "temperature"]),
    (Topic::Cough, &["cough", "throat"]),
    (Topic::ChestPain, &["chest pain", "heart"]),
    (Topic::Emergency, &["emergency", "urgent"]),
];

/// Case-insensitive, first-match-wins lookup. `None` means no advisory
/// applies; callers pick their own default (the handler escalates to an
/// error, the widget falls back to [`GENERAL_ADVICE`]).
pub fn match_topic(message: &str) -> Option<Topic> {
    let lower = message.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(topic, _)| *topic)
}

pub fn advice(topic: Topic) -> &'static str {
    match topic {
        Topic::Headache => {
            "For a headache, try resting in a quiet, dark room, drink plenty of water, \
             and consider an over-the-counter pain reliever if it is appropriate for you. \
             If the headache is sudden and severe, or lasts more than a few days, \
             please see a healthcare professional."
        }
        Topic::Fever => {
            "For a fever, rest and drink plenty of fluids. Light clothing and a lukewarm \
             compress can help you stay comfortable. If your temperature stays above \
             39°C (102°F) or the fever lasts more than three days, please contact a \
             healthcare provider."
        }
        Topic::Cough => {
            "For a cough or sore throat, warm fluids such as tea with honey can be \
             soothing, and a humidifier may help at night. If it lasts more than a week, \
             or you have trouble breathing, please see a healthcare professional."
        }
        Topic::ChestPain => {
            "⚠️ Chest pain can be serious. If you have chest pain together with shortness \
             of breath, sweating, nausea, or pain spreading to your arm or jaw, call \
             emergency services right away. Do not wait to see if it passes."
        }
        Topic::Emergency => {
            "If this is a medical emergency, please call your local emergency services \
             immediately. Do not wait for an online response."
        }
    }
}

/// Default wellness reply for the widget when nothing in the table matches.
pub const GENERAL_ADVICE: &str =
    "I recommend keeping track of your symptoms, staying hydrated, and getting plenty \
     of rest. If anything feels serious or does not improve, please reach out to a \
     healthcare professional.";

/// Appended when the provider credential is missing on the server.
pub const CONFIG_DISCLAIMER: &str =
    "\n\nNote: the AI assistant is not fully configured on this server, so this is \
     pre-written general guidance. Please consult a healthcare professional for advice \
     specific to you.";

/// Appended when a live provider call failed and a canned reply was used.
pub const OUTAGE_DISCLAIMER: &str =
    "\n\nNote: the AI assistant is experiencing a temporary service issue, so this is \
     pre-written general guidance. Please try again in a moment.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_each_topic() {
        assert_eq!(match_topic("I have a headache"), Some(Topic::Headache));
        assert_eq!(match_topic("awful head pain"), Some(Topic::Headache));
        assert_eq!(match_topic("running a temperature"), Some(Topic::Fever));
        assert_eq!(match_topic("sore throat since monday"), Some(Topic::Cough));
        assert_eq!(match_topic("my heart is racing"), Some(Topic::ChestPain));
        assert_eq!(match_topic("this is urgent"), Some(Topic::Emergency));
        assert_eq!(match_topic("I feel a bit off today"), None);
    }

    #[test]
    fn matching_is_case_insensitive_and_stable() {
        assert_eq!(match_topic("HEADACHE"), match_topic("headache"));
        assert_eq!(match_topic("FeVeR and chills"), Some(Topic::Fever));
        // Same input, same answer.
        assert_eq!(match_topic("cough"), match_topic("cough"));
    }

    #[test]
    fn first_group_wins_on_ties() {
        // Both headache and fever appear; headache is checked first.
        assert_eq!(
            match_topic("headache and fever since yesterday"),
            Some(Topic::Headache)
        );
    }
}
