use crate::config::{AccumulationPolicy, ForecastSettings, TierPolicy, TrajectoryCurve};

/// Static description of how the numbers were produced, for reports and exports.
pub fn methodology_text(settings: &ForecastSettings) -> String {
    let mut sections: Vec<String> = Vec::new();

    sections.push("Forecasting Methodology".to_string());

    sections.push(match settings.accumulation {
        AccumulationPolicy::IncrementalOnBaseline => "Traffic model: baseline plus growth. The forecast starts from the most \
recent historical monthly sessions and adds, each month, the traffic gained from keyword \
ranking improvements since the previous month. Each month builds on the previous total.\n\
Month N Sessions = Month N-1 Sessions + sum(Search Volume x (CTR at month N position - CTR at month N-1 position))"
            .to_string(),
        AccumulationPolicy::AbsolutePositionSum => "Traffic model: absolute position sum. Each month is computed independently \
as the traffic every keyword would receive at its projected position. Historical sessions \
are not folded in. Keywords with a measured CTR use it in place of the industry curve.\n\
Month N Sessions = sum(Search Volume x CTR at month N position)"
            .to_string(),
    });

    sections.push(match settings.curve {
        TrajectoryCurve::Accelerated => "Ranking trajectory: positions follow an accelerated decay curve, with \
faster gains in early months that slow as keywords approach their target positions."
            .to_string(),
        TrajectoryCurve::Plain => "Ranking trajectory: positions follow an exponential decay curve that closes \
about 95% of the gap to target by the end of the timeline."
            .to_string(),
    });

    sections.push(
        "Click-through rates: positions 1-20 use aggregated industry CTR data; deeper positions \
follow an exponential tail. Effort level scales how quickly rankings improve."
            .to_string(),
    );

    sections.push(match settings.tiers {
        TierPolicy::Fixed {
            conservative,
            optimistic,
        } => format!(
            "Confidence tiers: conservative = {:.0}% and optimistic = {:.0}% of the expected sessions.",
            conservative * 100.0,
            optimistic * 100.0
        ),
        TierPolicy::WidenWithTimeline { .. } => "Confidence tiers: conservative and optimistic bands are fixed multiples of \
the expected sessions that widen for longer timelines to reflect increased uncertainty."
            .to_string(),
    });

    sections.push(
        "Conversions = Sessions x historical conversion rate (2% when no history is supplied).\n\
Revenue = Conversions x revenue per conversion."
            .to_string(),
    );

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_reflects_policy() {
        let incremental = methodology_text(&ForecastSettings::default());
        assert!(incremental.contains("baseline plus growth"));
        assert!(incremental.contains("accelerated"));

        let absolute = methodology_text(
            &ForecastSettings::default()
                .with_accumulation(AccumulationPolicy::AbsolutePositionSum)
                .with_tiers(TierPolicy::Fixed {
                    conservative: 0.7,
                    optimistic: 1.3,
                }),
        );
        assert!(absolute.contains("absolute position sum"));
        assert!(absolute.contains("conservative = 70%"));
    }

    #[test]
    fn test_text_is_deterministic() {
        let settings = ForecastSettings::default();
        assert_eq!(methodology_text(&settings), methodology_text(&settings));
    }
}
