//! # Report Assembly
//!
//! Renders an [`Evaluation`] as a markdown-flavoured plain-text document
//! suitable for download.
//!
//! Precision: areas and volumes 1 decimal, powers 2 decimals, percentages
//! 0 decimals, refuel time 1 decimal.

use chrono::{DateTime, Utc};

use crate::calculations::recommendation::{Recommendation, SAFETY_MARGIN};
use crate::evaluation::{Evaluation, EvaluationInput};

/// Closing note printed at the end of every report
pub const DISCLAIMER: &str = "*This estimate is preliminary. Selecting equipment precisely \
requires a specialist consultation and a detailed thermal audit of the building.*";

/// What to include beyond the fixed sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Per-model output table
    pub model_table: bool,
    /// Formulas used, from the equation registry
    pub equations: bool,
    /// Generation time printed under the title
    pub generated_at: Option<DateTime<Utc>>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            model_table: true,
            equations: true,
            generated_at: None,
        }
    }
}

impl ReportOptions {
    /// Only the fixed sections
    pub fn summary() -> Self {
        ReportOptions {
            model_table: false,
            equations: false,
            generated_at: None,
        }
    }

    pub fn with_timestamp(self, at: DateTime<Utc>) -> Self {
        ReportOptions {
            generated_at: Some(at),
            ..self
        }
    }

    /// Stamp with the current time
    pub fn stamped(self) -> Self {
        self.with_timestamp(Utc::now())
    }
}

/// Whole numbers without a fraction, everything else in shortest form
fn number(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}

/// Shortest form, but always with a fractional part (100 -> "100.0")
fn decimal(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// Download filename, e.g. `Musson_Report_A100.0_H2.5_T-20.txt`
pub fn report_filename(input: &EvaluationInput) -> String {
    format!(
        "Musson_Report_A{}_H{}_T{}.txt",
        decimal(input.area_m2),
        decimal(input.height_m),
        number(input.t_out_c)
    )
}

/// Render the report.
pub fn render_report(input: &EvaluationInput, evaluation: &Evaluation, options: &ReportOptions) -> String {
    let mut out = String::with_capacity(2_000);

    out.push_str("# Furnace Selection Report \"Муссон\"\n\n");
    if let Some(at) = options.generated_at {
        out.push_str(&format!("Generated: {}\n\n", at.format("%Y-%m-%d %H:%M UTC")));
    }

    out.push_str("## 1. Room and Climate\n");
    out.push_str(&format!("- Floor area: {:.1} m²\n", input.area_m2));
    out.push_str(&format!("- Ceiling height: {:.1} m\n", input.height_m));
    out.push_str(&format!("- Room volume: {:.1} m³\n", input.area_m2 * input.height_m));
    out.push_str(&format!("- Wall construction: {}\n", input.construction));
    out.push_str(&format!("- Wall / insulation thickness: {} cm\n", number(input.thickness_cm)));
    out.push_str(&format!("- Indoor temperature: {} °C\n", number(input.t_in_c)));
    out.push_str(&format!("- Outdoor temperature: {} °C\n\n", number(input.t_out_c)));

    out.push_str("## 2. Heat Loss\n");
    out.push_str(&format!(
        "- **Heat loss to compensate: {:.2} kW**\n",
        evaluation.heat_loss.total_kw
    ));
    out.push_str(&format!(
        "- With {:.0}% margin: **{:.2} kW**\n\n",
        (SAFETY_MARGIN - 1.0) * 100.0,
        evaluation.required_load_kw
    ));

    out.push_str("## 3. Firing\n");
    out.push_str(&format!("- Firewood: {}\n", input.species));
    out.push_str(&format!("- Firebox fill: {:.0}%\n", input.fill_percent));
    out.push_str(&format!("- Furnace efficiency: {:.0}%\n", input.efficiency_percent));
    out.push_str(&format!("- Burn duration per charge: {} h\n\n", number(input.burn_hours)));

    out.push_str("## 4. Recommendation\n");
    match &evaluation.recommendation {
        Recommendation::Single {
            model,
            refuel_interval_h,
            ..
        } => {
            out.push_str(&format!("- **Recommended model: {}**\n", model));
            out.push_str(&format!(
                "- **Refuelling:** to hold about {} °C, load the next charge **every {:.1} h.**\n",
                number(input.t_in_c),
                refuel_interval_h
            ));
        }
        Recommendation::Cascade(cascade) => {
            out.push_str("- No single model covers the heat loss.\n");
            out.push_str(&format!(
                "- **Cascade:** as an alternative, install {}.\n",
                cascade.descriptor()
            ));
        }
        Recommendation::None => {
            out.push_str("- No single model covers the heat loss.\n");
        }
    }

    let mut section = 5;

    if options.model_table && !evaluation.runs.is_empty() {
        out.push_str(&format!("\n## {}. Output per Model\n\n", section));
        out.push_str("| Model | Firebox, L | Usable energy, kWh | Average, kW | Peak, kW |\n");
        out.push_str("|-------|-----------:|-------------------:|------------:|---------:|\n");
        for run in &evaluation.runs {
            out.push_str(&format!(
                "| {} | {} | {:.1} | {:.2} | {:.2} |\n",
                run.name(),
                number(run.model.volume_l),
                run.burn.charge.usable_energy_kwh,
                run.average_power_kw(),
                run.burn.peak_power_kw
            ));
        }
        section += 1;
    }

    if options.equations && !evaluation.equations.is_empty() {
        out.push_str(&format!("\n## {}. Formulas Used\n", section));
        for (category, equations) in evaluation.equation_tracker().by_category() {
            out.push_str(&format!("\n### {}\n", category.display_name()));
            for eq in equations {
                let meta = eq.metadata();
                out.push_str(&format!(
                    "- {}: `{}` ({})\n",
                    meta.name,
                    meta.formula_plain,
                    meta.reference.citation()
                ));
            }
        }
    }

    out.push_str("\n---\n");
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::wall::WallConstruction;
    use crate::catalog::Catalog;
    use crate::equations::Equation;
    use crate::evaluation::evaluate;
    use chrono::TimeZone;

    fn reference() -> (EvaluationInput, Evaluation) {
        let input = EvaluationInput::default();
        let evaluation = evaluate(&input, Catalog::builtin()).unwrap();
        (input, evaluation)
    }

    #[test]
    fn test_filename() {
        let (input, _) = reference();
        assert_eq!(report_filename(&input), "Musson_Report_A100.0_H2.5_T-20.txt");

        let other = EvaluationInput {
            area_m2: 62.5,
            height_m: 3.0,
            t_out_c: 5.0,
            ..input
        };
        assert_eq!(report_filename(&other), "Musson_Report_A62.5_H3.0_T5.txt");
    }

    #[test]
    fn test_reference_report_sections() {
        let (input, evaluation) = reference();
        let text = render_report(&input, &evaluation, &ReportOptions::default());

        assert!(text.contains("- Floor area: 100.0 m²"));
        assert!(text.contains("- Room volume: 250.0 m³"));
        assert!(text.contains("- Wall construction: Brick"));
        assert!(text.contains("- Wall / insulation thickness: 40 cm"));
        assert!(text.contains("- Outdoor temperature: -20 °C"));
        assert!(text.contains("**Heat loss to compensate: 9.21 kW**"));
        assert!(text.contains("With 20% margin: **11.05 kW**"));
        assert!(text.contains("- Firebox fill: 80%"));
        assert!(text.contains("- Furnace efficiency: 85%"));
        assert!(text.contains("**Recommended model: Муссон 2000**"));
        assert!(text.contains("**every 7.0 h.**"));
        assert!(!text.contains("Cascade"));
        assert!(text.contains("| Муссон 600 | 125 |"));
        assert!(text.contains("## 6. Formulas Used"));
        assert!(text.trim_end().ends_with(DISCLAIMER));
    }

    #[test]
    fn test_timestamp_only_when_requested() {
        let (input, evaluation) = reference();
        let plain = render_report(&input, &evaluation, &ReportOptions::default());
        assert!(!plain.contains("Generated:"));

        let at = Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap();
        let stamped = render_report(&input, &evaluation, &ReportOptions::default().with_timestamp(at));
        assert!(stamped.contains("Generated: 2026-10-17 09:30 UTC"));
    }

    #[test]
    fn test_formulas_grouped_by_category() {
        let (input, evaluation) = reference();
        let text = render_report(&input, &evaluation, &ReportOptions::default());
        let appendix = &text[text.find("Formulas Used").unwrap()..];

        let headings: Vec<usize> = evaluation
            .equation_tracker()
            .by_category()
            .iter()
            .map(|(category, _)| appendix.find(&format!("### {}", category.display_name())).unwrap())
            .collect();
        assert!(headings.len() >= 3);
        assert!(headings.windows(2).all(|w| w[0] < w[1]));
        assert!(appendix.contains("`P_peak = 2 * P_avg`"));
        assert!(!appendix.contains(&Equation::CascadeCount.metadata().name));
    }

    #[test]
    fn test_summary_omits_appendix() {
        let (input, evaluation) = reference();
        let text = render_report(&input, &evaluation, &ReportOptions::summary());
        assert!(!text.contains("Output per Model"));
        assert!(!text.contains("Formulas Used"));
        assert!(text.contains(DISCLAIMER));
    }

    #[test]
    fn test_cascade_report() {
        let input = EvaluationInput {
            area_m2: 2000.0,
            height_m: 6.0,
            construction: WallConstruction::Brick,
            thickness_cm: 5.0,
            t_in_c: 70.0,
            t_out_c: -50.0,
            burn_hours: 24.0,
            ..EvaluationInput::default()
        };
        let evaluation = evaluate(&input, Catalog::builtin()).unwrap();
        let text = render_report(&input, &evaluation, &ReportOptions::default());
        assert!(text.contains("No single model covers the heat loss."));
        assert!(text.contains("× Муссон 2000."));
        assert!(!text.contains("Recommended model"));
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(number(40.0), "40");
        assert_eq!(number(-20.0), "-20");
        assert_eq!(number(2.5), "2.5");
        assert_eq!(decimal(100.0), "100.0");
        assert_eq!(decimal(2.55), "2.55");
    }
}
