//! Secondary aggregation of station data for charting.
//!
//! Raw-sample statistics come from the backend; this crate only derives
//! what the backend does not send directly (yearly averages built from
//! monthly snapshots) and the number handling shared by forms and tables.

/// Monthly → yearly reduction.
pub mod aggregation {
    use log::warn;
    use sra_core::detail::MonthlyData;

    /// Arithmetic mean of the finite values; `None` if there are none.
    pub fn mean(values: &[Option<f64>]) -> Option<f64> {
        let finite: Vec<f64> = values
            .iter()
            .flatten()
            .copied()
            .filter(|v| v.is_finite())
            .collect();
        if finite.is_empty() {
            return None;
        }
        Some(finite.iter().sum::<f64>() / finite.len() as f64)
    }

    /// One parameter's averaged value per year.
    #[derive(Debug, Clone, PartialEq)]
    pub struct YearlySeries {
        pub parameter: String,
        /// Aligned with [`YearlyAverages::years`].
        pub values: Vec<Option<f64>>,
    }

    /// Yearly averages for a set of parameters across a set of years.
    #[derive(Debug, Clone, PartialEq)]
    pub struct YearlyAverages {
        pub years: Vec<i32>,
        pub series: Vec<YearlySeries>,
    }

    impl YearlyAverages {
        pub fn values(&self, parameter: &str) -> Option<&[Option<f64>]> {
            self.series
                .iter()
                .find(|s| s.parameter == parameter)
                .map(|s| s.values.as_slice())
        }
    }

    /// Reduce each year's monthly values to one mean per parameter.
    ///
    /// Years keep the order of `per_year`; parameters keep the order of
    /// `parameters`. A parameter missing from a year's snapshot yields a gap.
    pub fn yearly_averages(per_year: &[(i32, MonthlyData)], parameters: &[String]) -> YearlyAverages {
        let years = per_year.iter().map(|(year, _)| *year).collect();
        let series = parameters
            .iter()
            .map(|parameter| {
                let values = per_year
                    .iter()
                    .map(|(year, monthly)| match monthly.values(parameter) {
                        Some(values) => mean(values),
                        None => {
                            warn!("No monthly {} data for {}", parameter, year);
                            None
                        }
                    })
                    .collect();
                YearlySeries {
                    parameter: parameter.clone(),
                    values,
                }
            })
            .collect();
        YearlyAverages { years, series }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use sra_core::detail::ParameterSeries;

        fn monthly(parameter: &str, start: i32) -> MonthlyData {
            MonthlyData {
                months: (1..=12).map(|m| format!("M{m}")).collect(),
                series: vec![ParameterSeries {
                    parameter: parameter.to_string(),
                    values: (start..start + 12).map(|v| Some(v as f64)).collect(),
                }],
            }
        }

        #[test]
        fn test_mean_skips_nulls() {
            assert_eq!(mean(&[Some(1.0), None, Some(3.0)]), Some(2.0));
            assert_eq!(mean(&[None, None]), None);
            assert_eq!(mean(&[]), None);
        }

        #[test]
        fn test_yearly_averages_from_monthly() {
            let per_year = vec![
                (2017, monthly("GHI", 1)),
                (2018, monthly("GHI", 2)),
                (2019, monthly("GHI", 3)),
            ];
            let averages = yearly_averages(&per_year, &["GHI".to_string()]);
            assert_eq!(averages.years, vec![2017, 2018, 2019]);
            assert_eq!(
                averages.values("GHI").unwrap(),
                &[Some(6.5), Some(7.5), Some(8.5)]
            );
        }

        #[test]
        fn test_missing_parameter_is_a_gap() {
            let per_year = vec![(2017, monthly("GHI", 1)), (2018, monthly("DNI", 1))];
            let averages = yearly_averages(&per_year, &["GHI".to_string()]);
            assert_eq!(averages.values("GHI").unwrap(), &[Some(6.5), None]);
        }
    }
}

/// Parsing and formatting of form and table numbers.
pub mod numbers {
    /// Parse user input as a finite number. Blank, `NaN` and infinities are rejected.
    pub fn parse_finite(input: &str) -> Option<f64> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    /// Literal shown for a missing statistic.
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Render a summary statistic cell.
    pub fn format_stat(value: Option<f64>) -> String {
        match value {
            Some(v) if v.is_finite() => v.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }

    /// Render a value written into a form input.
    pub fn format_input(value: f64) -> String {
        value.to_string()
    }

}
