use renkoflow::{PipelineOutput, SignalEvaluator, SignalKind, Trend};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditReport {
    pub bricks: usize,
    pub buys: usize,
    pub sells: usize,
    pub flips: usize,
    pub violations: Vec<String>,
}

impl AuditReport {
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Re-checks brick geometry, band ratcheting and signal classification.
pub fn audit_outputs(outputs: &[PipelineOutput], brick_size: Decimal) -> AuditReport {
    let mut report = AuditReport {
        bricks: outputs.len(),
        ..AuditReport::default()
    };

    for (idx, output) in outputs.iter().enumerate() {
        let brick = &output.brick;
        if brick.body() != brick_size {
            report
                .violations
                .push(format!("BRICK height mismatch at #{idx}: body={}", brick.body()));
        }
        if brick.high != brick.open.max(brick.close) || brick.low != brick.open.min(brick.close) {
            report
                .violations
                .push(format!("BRICK high/low mismatch at #{idx}"));
        }
        if brick.is_up() != (brick.direction == renkoflow::Direction::Up) {
            report
                .violations
                .push(format!("BRICK direction mismatch at #{idx}"));
        }
        match output.signal.kind {
            SignalKind::Buy => report.buys += 1,
            SignalKind::Sell => report.sells += 1,
            SignalKind::Hold => {}
        }
        if output.snapshot.flipped {
            report.flips += 1;
        }
    }

    for (idx, pair) in outputs.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let at = idx + 1;
        if curr.brick.open != prev.brick.close {
            report.violations.push(format!(
                "BRICK chain broken at #{at}: open={} prev_close={}",
                curr.brick.open, prev.brick.close
            ));
        }
        if curr.brick.timestamp < prev.brick.timestamp {
            report
                .violations
                .push(format!("BRICK timestamp regressed at #{at}"));
        }

        if let (Some(p), Some(c)) = (prev.snapshot.band_value, curr.snapshot.band_value) {
            let ratchet_broken = !curr.snapshot.flipped
                && match curr.snapshot.trend {
                    Trend::Up => c < p,
                    Trend::Down => c > p,
                    Trend::Unknown => false,
                };
            if ratchet_broken {
                report.violations.push(format!(
                    "BAND ratchet broken at #{at}: trend={} {p} -> {c}",
                    curr.snapshot.trend.as_str()
                ));
            }
        }

        let evaluator = SignalEvaluator;
        let buy = evaluator.buy_setup(&prev.brick, &prev.snapshot, &curr.brick);
        let sell = evaluator.sell_setup(&prev.brick, &prev.snapshot, &curr.brick);
        if buy && sell {
            report
                .violations
                .push(format!("SIGNAL buy and sell both armed at #{at}"));
        }
        let expected = evaluator.evaluate(&prev.brick, &prev.snapshot, &curr.brick);
        if expected != curr.signal {
            report.violations.push(format!(
                "SIGNAL mismatch at #{at}: got {}, expected {}",
                curr.signal.kind, expected.kind
            ));
        }
    }

    report
}
