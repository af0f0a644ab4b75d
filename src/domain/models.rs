use serde::{Deserialize, Serialize};

/// The four facts a user supplies about their business.
///
/// A fresh value is created for every submission; the copy handed to the
/// orchestrator never changes, even if the form is edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessInput {
    pub name: String,
    pub category: String,
    pub location: String,
    pub details: String,
}

impl BusinessInput {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            location: location.into(),
            details: details.into(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Category => &self.category,
            FormField::Location => &self.location,
            FormField::Details => &self.details,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Category => &mut self.category,
            FormField::Location => &mut self.location,
            FormField::Details => &mut self.details,
        }
    }
}

/// Identifies one of the four input fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Category,
    Location,
    Details,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Category,
        FormField::Location,
        FormField::Details,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Business Name",
            FormField::Category => "Business Category / Field",
            FormField::Location => "Location of Service",
            FormField::Details => "Additional Details",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "e.g., Artisan Coffee Roasters",
            FormField::Category => "e.g., Food & Beverage, Retail",
            FormField::Location => "e.g., San Francisco, CA or Online",
            FormField::Details => {
                "Describe your business, target audience, main products/services, and any current challenges or goals."
            }
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::Details)
    }

    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::Category,
            FormField::Category => FormField::Location,
            FormField::Location => FormField::Details,
            FormField::Details => FormField::Name,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Name => FormField::Details,
            FormField::Category => FormField::Name,
            FormField::Location => FormField::Category,
            FormField::Details => FormField::Location,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwotAnalysis {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
}

/// Shape shared by the growth, marketing and operations subsections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub title: String,
    pub content: String,
    pub points: Vec<String>,
}

/// The structured plan returned by the generation backend.
///
/// Every field is required when deserializing, so a value of this type is
/// always fully populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessReport {
    pub executive_summary: String,
    pub swot_analysis: SwotAnalysis,
    pub growth_areas: ReportSection,
    pub marketing_strategies: ReportSection,
    pub operational_improvements: ReportSection,
}

impl BusinessReport {
    /// The three generic subsections in display order.
    pub fn sections(&self) -> [&ReportSection; 3] {
        [
            &self.growth_areas,
            &self.marketing_strategies,
            &self.operational_improvements,
        ]
    }

    /// Renders the report as Markdown, suitable for pasting elsewhere.
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("## Executive Summary\n\n");
        out.push_str(&self.executive_summary);
        out.push_str("\n\n## SWOT Analysis\n");

        let swot = &self.swot_analysis;
        for (heading, items) in [
            ("Strengths", &swot.strengths),
            ("Weaknesses", &swot.weaknesses),
            ("Opportunities", &swot.opportunities),
            ("Threats", &swot.threats),
        ] {
            out.push_str(&format!("\n### {heading}\n\n"));
            for item in items {
                out.push_str(&format!("- {item}\n"));
            }
        }

        for section in self.sections() {
            out.push_str(&format!("\n## {}\n\n{}\n\n", section.title, section.content));
            for point in &section.points {
                out.push_str(&format!("- {point}\n"));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> BusinessReport {
        BusinessReport {
            executive_summary: "Grow online.".to_string(),
            swot_analysis: SwotAnalysis {
                strengths: vec!["Loyal customers".to_string()],
                weaknesses: vec!["Small team".to_string()],
                opportunities: vec!["E-commerce".to_string()],
                threats: vec!["Chains".to_string()],
            },
            growth_areas: ReportSection {
                title: "Key Growth Areas".to_string(),
                content: "Where to grow.".to_string(),
                points: vec!["Subscriptions".to_string()],
            },
            marketing_strategies: ReportSection {
                title: "Actionable Marketing Strategies".to_string(),
                content: "How to be seen.".to_string(),
                points: vec!["Instagram".to_string(), "Local events".to_string()],
            },
            operational_improvements: ReportSection {
                title: "Operational Improvements".to_string(),
                content: "Run leaner.".to_string(),
                points: vec![],
            },
        }
    }

    #[test]
    fn test_field_cycle() {
        let mut field = FormField::Name;
        for _ in 0..4 {
            field = field.next();
        }
        assert_eq!(field, FormField::Name);
        assert_eq!(FormField::Name.previous(), FormField::Details);
        assert_eq!(FormField::Details.next().previous(), FormField::Details);
    }

    #[test]
    fn test_input_field_access() {
        let mut input = BusinessInput::new("Cafe", "Food", "SF", "Small");
        assert_eq!(input.get(FormField::Location), "SF");
        input.get_mut(FormField::Location).push_str(", CA");
        assert_eq!(input.location, "SF, CA");
        assert_eq!(input.name, "Cafe");
    }

    #[test]
    fn test_report_uses_camel_case_keys() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert!(json.get("executiveSummary").is_some());
        assert!(json.get("swotAnalysis").is_some());
        assert!(json.get("operationalImprovements").is_some());
        assert!(json.get("executive_summary").is_none());
    }

    #[test]
    fn test_to_markdown() {
        let markdown = sample_report().to_markdown();
        assert!(markdown.starts_with("## Executive Summary\n\nGrow online."));
        assert!(markdown.contains("### Threats\n\n- Chains\n"));
        assert!(markdown.contains("## Actionable Marketing Strategies\n\nHow to be seen.\n\n- Instagram\n- Local events\n"));
        assert!(markdown.contains("## Operational Improvements\n\nRun leaner.\n"));
    }
}
