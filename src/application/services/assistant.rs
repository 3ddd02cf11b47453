//! Keyword-driven help assistant.
//!
//! Questions are matched against an ordered rule table; the first rule with a
//! keyword contained in the lower-cased question answers it.

use crate::domain::value_objects::parameter::Parameter;
use crate::domain::value_objects::thresholds::ThresholdSet;

pub const GREETING: &str = "Hello! I'm your Namjai assistant. I can help you with:\n\
\n\
  • Understanding water quality metrics\n\
  • Interpreting alerts\n\
  • Submitting reports\n\
  • Scheduling maintenance\n\
  • System navigation\n\
\n\
How can I assist you today?";

const FALLBACK: &str = "I can help you with water quality metrics, alerts, reports, maintenance, \
and system navigation. Could you please be more specific about what you need help with?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Metric(Parameter),
    Alerts,
    Reports,
    Maintenance,
    Roles,
}

struct Rule {
    keywords: &'static [&'static str],
    topic: Topic,
}

const RULES: &[Rule] = &[
    Rule {
        keywords: &["ph", "acid"],
        topic: Topic::Metric(Parameter::Ph),
    },
    Rule {
        keywords: &["turbidity", "cloudy"],
        topic: Topic::Metric(Parameter::Turbidity),
    },
    Rule {
        keywords: &["tds", "dissolved solids"],
        topic: Topic::Metric(Parameter::Tds),
    },
    Rule {
        keywords: &["temperature"],
        topic: Topic::Metric(Parameter::Temperature),
    },
    Rule {
        keywords: &["alert", "notification"],
        topic: Topic::Alerts,
    },
    Rule {
        keywords: &["report"],
        topic: Topic::Reports,
    },
    Rule {
        keywords: &["maintenance"],
        topic: Topic::Maintenance,
    },
    Rule {
        keywords: &["role", "permission"],
        topic: Topic::Roles,
    },
];

/// Answers help questions, quoting the currently configured bands.
pub struct Assistant<'a> {
    thresholds: &'a ThresholdSet,
}

impl<'a> Assistant<'a> {
    #[must_use]
    pub const fn new(thresholds: &'a ThresholdSet) -> Self {
        Self { thresholds }
    }

    #[must_use]
    pub fn answer(&self, question: &str) -> String {
        let question = question.to_lowercase();
        RULES
            .iter()
            .find(|rule| rule.keywords.iter().any(|k| question.contains(k)))
            .map_or_else(|| FALLBACK.to_string(), |rule| self.respond(rule.topic))
    }

    fn range(&self, parameter: Parameter) -> String {
        self.thresholds
            .get(parameter)
            .map_or_else(|_| "not configured".to_string(), |t| t.warning_range())
    }

    fn respond(&self, topic: Topic) -> String {
        match topic {
            Topic::Metric(Parameter::Ph) => format!(
                "pH measures water acidity/alkalinity. Safe drinking water should be between {}. \
                 Values outside this range may indicate contamination or treatment issues.",
                self.range(Parameter::Ph)
            ),
            Topic::Metric(Parameter::Turbidity) => format!(
                "Turbidity measures water cloudiness. It should stay within {} for safe drinking \
                 water. High turbidity can indicate sediment, algae, or other particles.",
                self.range(Parameter::Turbidity)
            ),
            Topic::Metric(Parameter::Tds) => format!(
                "TDS (Total Dissolved Solids) measures mineral content in ppm. Safe range is {}. \
                 High TDS may affect taste but isn't always harmful.",
                self.range(Parameter::Tds)
            ),
            Topic::Metric(Parameter::Temperature) => format!(
                "Temperature should be {} for optimal water quality. Extreme temperatures can \
                 affect microbial growth and water treatment efficiency.",
                self.range(Parameter::Temperature)
            ),
            Topic::Alerts => "Alerts are generated when sensor readings leave their warning \
                 band. Critical alerts require immediate attention. Admins and field officers \
                 can acknowledge them with `namjai ack <alert-id>`."
                .to_string(),
            Topic::Reports => "To submit a report, run `namjai reports submit --tank <id> \
                 --kind <type> --description <text>`, optionally with `--photo <url>`. Reports \
                 help track infrastructure issues."
                .to_string(),
            Topic::Maintenance => "Regular maintenance includes sensor calibration (quarterly), \
                 filter replacement (6 months), and tank cleaning (annually). Run \
                 `namjai maintenance list` to see schedules."
                .to_string(),
            Topic::Roles => "Admins have full access. Field officers can acknowledge alerts, \
                 review reports and manage maintenance. Observers have read-only access to \
                 dashboards and alerts, and can submit reports."
                .to_string(),
        }
    }
}
