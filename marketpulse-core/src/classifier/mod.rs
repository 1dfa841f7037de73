//! Market classifier and adaptive signal generator.
//!
//! Consumes the latest pair of annotated bars and produces one
//! `MarketAnalysis`: trend direction, market-condition label, trading
//! signal, and an integer confidence score in [0, 99]. A side-effect-free
//! function of its inputs; results are never memoized.
//!
//! Condition classification is mutually exclusive, in priority order:
//! volatile (ATR relative to price) dominates trending (MA spread relative
//! to price), which dominates ranging. The signal rules then adapt to the
//! condition — momentum-following while trending, mean-reversion while
//! ranging, and extreme-only entries (with a confidence penalty) while
//! volatile. Any computed signal below 75 confidence is gated to Hold.

use crate::domain::{AnnotatedBar, Instrument, MarketAnalysis, MarketCondition, Signal, Trend};

/// ATR / price above this is a volatile market.
pub const VOLATILITY_THRESHOLD: f64 = 0.0025;
/// |ma50 - ma200| / price above this is a trending market.
pub const TREND_SPREAD_THRESHOLD: f64 = 0.0005;
/// Minimum MA spread before a directional trend is declared.
pub const TREND_BIAS_THRESHOLD: f64 = 0.0002;
/// |histogram| above this counts as strong momentum.
pub const MOMENTUM_STRENGTH_THRESHOLD: f64 = 0.0001;
/// Computed signals below this confidence are gated to Hold.
pub const ACTIONABLE_CONFIDENCE: f64 = 75.0;

/// Classify the market from the latest two adjacent annotated bars.
///
/// `previous` completes the adjacent-pair input contract; the current
/// threshold rules read only the latest bar's values. While `ma50` or
/// `ma200` is still warming up the degenerate record is returned: neutral
/// trend, ranging condition, Hold at zero confidence.
pub fn analyze(
    current: &AnnotatedBar,
    _previous: &AnnotatedBar,
    instrument: &Instrument,
) -> MarketAnalysis {
    let price = current.bar.close;

    let (Some(ma50), Some(ma200)) = (current.ma50, current.ma200) else {
        return MarketAnalysis::insufficient_history(instrument, price);
    };
    // By the annotation invariant these are present whenever ma200 is; a
    // hand-built bar that violates it degrades to the same degenerate form.
    let (Some(rsi), Some(macd), Some(atr)) = (current.rsi, current.macd, current.atr) else {
        return MarketAnalysis::insufficient_history(instrument, price);
    };

    let spread_pct = (ma50 - ma200).abs() / price;
    let volatility_pct = atr / price;

    let condition = if volatility_pct > VOLATILITY_THRESHOLD {
        MarketCondition::Volatile
    } else if spread_pct > TREND_SPREAD_THRESHOLD {
        MarketCondition::Trending
    } else {
        MarketCondition::Ranging
    };

    let trend = if ma50 > ma200 && spread_pct > TREND_BIAS_THRESHOLD {
        Trend::Bullish
    } else if ma50 < ma200 && spread_pct > TREND_BIAS_THRESHOLD {
        Trend::Bearish
    } else {
        Trend::Neutral
    };

    let momentum_bullish = macd.histogram > 0.0 && macd.macd > macd.signal;
    let momentum_bearish = macd.histogram < 0.0 && macd.macd < macd.signal;
    let strong = macd.histogram.abs() > MOMENTUM_STRENGTH_THRESHOLD;

    let mut signal = Signal::Hold;
    let mut confidence: f64 = 50.0;

    match condition {
        MarketCondition::Trending => match trend {
            Trend::Bullish => {
                let buy = (rsi < 60.0 && momentum_bullish)
                    || (price > ma50 && momentum_bullish && strong);
                if buy {
                    signal = Signal::Buy;
                    confidence += 25.0;
                    if momentum_bullish && strong {
                        confidence += 10.0;
                    }
                    if rsi < 45.0 {
                        confidence += 10.0;
                    }
                    if price > ma50 {
                        confidence += 5.0;
                    }
                }
            }
            Trend::Bearish => {
                let sell = (rsi > 40.0 && momentum_bearish)
                    || (price < ma50 && momentum_bearish && strong);
                if sell {
                    signal = Signal::Sell;
                    confidence += 25.0;
                    if momentum_bearish && strong {
                        confidence += 10.0;
                    }
                    if rsi > 55.0 {
                        confidence += 10.0;
                    }
                    if price < ma50 {
                        confidence += 5.0;
                    }
                }
            }
            Trend::Neutral => {}
        },
        MarketCondition::Ranging => {
            // Mean reversion: buy oversold, sell overbought, with the
            // distance past the band feeding the score.
            if rsi < 30.0 && momentum_bullish {
                signal = Signal::Buy;
                confidence += 20.0 + (30.0 - rsi);
            } else if rsi > 70.0 && momentum_bearish {
                signal = Signal::Sell;
                confidence += 20.0 + (rsi - 70.0);
            }
        }
        MarketCondition::Volatile => {
            // Penalty applies whether or not a signal fires.
            confidence -= 20.0;
            if rsi < 25.0 && momentum_bullish {
                signal = Signal::Buy;
                confidence += 30.0;
            } else if rsi > 75.0 && momentum_bearish {
                signal = Signal::Sell;
                confidence += 30.0;
            }
        }
    }

    if confidence < ACTIONABLE_CONFIDENCE {
        signal = Signal::Hold;
    }

    MarketAnalysis {
        symbol: instrument.symbol().to_string(),
        price,
        ma50: Some(ma50),
        ma200: Some(ma200),
        rsi: Some(rsi),
        macd: Some(macd),
        atr: Some(atr),
        trend,
        condition,
        signal,
        confidence: confidence.round().clamp(0.0, 99.0) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Macd};
    use chrono::{TimeZone, Utc};

    fn bar_at(close: f64) -> Bar {
        Bar {
            timestamp: Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
            open: close,
            high: close + 0.001,
            low: close - 0.001,
            close,
            volume: 1000.0,
        }
    }

    struct Setup {
        price: f64,
        ma50: f64,
        ma200: f64,
        rsi: f64,
        atr: f64,
        histogram: f64,
    }

    impl Setup {
        fn annotated(&self) -> AnnotatedBar {
            // macd/signal chosen so the momentum flags follow the histogram sign.
            let (macd, signal) = if self.histogram >= 0.0 {
                (self.histogram, 0.0)
            } else {
                (0.0, -self.histogram)
            };
            AnnotatedBar {
                bar: bar_at(self.price),
                ma50: Some(self.ma50),
                ma200: Some(self.ma200),
                rsi: Some(self.rsi),
                macd: Some(Macd {
                    macd,
                    signal,
                    histogram: self.histogram,
                }),
                atr: Some(self.atr),
            }
        }
    }

    fn run(setup: &Setup) -> MarketAnalysis {
        let current = setup.annotated();
        let previous = current.clone();
        analyze(&current, &previous, &Instrument::new("EURUSD"))
    }

    #[test]
    fn missing_long_ma_gives_degenerate_record() {
        let mut current = Setup {
            price: 1.102,
            ma50: 1.10,
            ma200: 1.05,
            rsi: 50.0,
            atr: 0.001,
            histogram: 0.001,
        }
        .annotated();
        current.ma200 = None;
        let previous = current.clone();
        let analysis = analyze(&current, &previous, &Instrument::new("EURUSD"));
        assert_eq!(analysis.trend, Trend::Neutral);
        assert_eq!(analysis.condition, MarketCondition::Ranging);
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.confidence, 0);
    }

    #[test]
    fn volatile_dominates_trending() {
        // Spread would classify as trending, but volatility wins.
        let analysis = run(&Setup {
            price: 1.10,
            ma50: 1.12,
            ma200: 1.05,
            rsi: 50.0,
            atr: 0.01, // vol_pct ≈ 0.009 > 0.0025
            histogram: 0.001,
        });
        assert_eq!(analysis.condition, MarketCondition::Volatile);
    }

    #[test]
    fn trending_bullish_buy_reaches_full_confidence() {
        // Fires: rsi < 60 with bullish momentum. Bonuses: +25 base, +10
        // strong momentum, +10 rsi < 45, +5 price above ma50 → 100 → clamp 99.
        let analysis = run(&Setup {
            price: 1.102,
            ma50: 1.10,
            ma200: 1.09,
            rsi: 40.0,
            atr: 0.0005,
            histogram: 0.001,
        });
        assert_eq!(analysis.condition, MarketCondition::Trending);
        assert_eq!(analysis.trend, Trend::Bullish);
        assert_eq!(analysis.signal, Signal::Buy);
        assert_eq!(analysis.confidence, 99);
    }

    #[test]
    fn trending_bearish_mirrors_buy_rules() {
        let analysis = run(&Setup {
            price: 1.088,
            ma50: 1.09,
            ma200: 1.10,
            rsi: 60.0,
            atr: 0.0005,
            histogram: -0.001,
        });
        assert_eq!(analysis.trend, Trend::Bearish);
        assert_eq!(analysis.signal, Signal::Sell);
        // +25 base, +10 strong, +10 rsi > 55, +5 price below ma50 → 99.
        assert_eq!(analysis.confidence, 99);
    }

    #[test]
    fn trending_without_momentum_holds_at_base() {
        let analysis = run(&Setup {
            price: 1.102,
            ma50: 1.10,
            ma200: 1.09,
            rsi: 40.0,
            atr: 0.0005,
            histogram: -0.001, // bearish momentum in a bullish trend
        });
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.confidence, 50);
    }

    #[test]
    fn ranging_oversold_buy_passes_gate() {
        // rsi = 20 → 50 + 20 + (30 - 20) = 80 ≥ 75 → Buy.
        let analysis = run(&Setup {
            price: 1.102,
            ma50: 1.1000,
            ma200: 1.1001,
            rsi: 20.0,
            atr: 0.0005,
            histogram: 0.001,
        });
        assert_eq!(analysis.condition, MarketCondition::Ranging);
        assert_eq!(analysis.signal, Signal::Buy);
        assert_eq!(analysis.confidence, 80);
    }

    #[test]
    fn ranging_shallow_oversold_is_gated_to_hold() {
        // rsi = 29 → 50 + 20 + 1 = 71 < 75 → forced Hold, confidence kept.
        let analysis = run(&Setup {
            price: 1.102,
            ma50: 1.1000,
            ma200: 1.1001,
            rsi: 29.0,
            atr: 0.0005,
            histogram: 0.001,
        });
        assert_eq!(analysis.condition, MarketCondition::Ranging);
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.confidence, 71);
    }

    #[test]
    fn ranging_overbought_sell_scales_with_rsi() {
        // rsi = 85 → 50 + 20 + 15 = 85 → Sell.
        let analysis = run(&Setup {
            price: 1.102,
            ma50: 1.1000,
            ma200: 1.1001,
            rsi: 85.0,
            atr: 0.0005,
            histogram: -0.001,
        });
        assert_eq!(analysis.signal, Signal::Sell);
        assert_eq!(analysis.confidence, 85);
    }

    #[test]
    fn volatile_entries_never_pass_the_gate() {
        // 50 - 20 + 30 = 60 < 75: even an extreme-RSI entry is gated.
        let analysis = run(&Setup {
            price: 1.10,
            ma50: 1.12,
            ma200: 1.05,
            rsi: 20.0,
            atr: 0.01,
            histogram: 0.001,
        });
        assert_eq!(analysis.condition, MarketCondition::Volatile);
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.confidence, 60);
    }

    #[test]
    fn volatile_without_signal_scores_thirty() {
        let analysis = run(&Setup {
            price: 1.10,
            ma50: 1.12,
            ma200: 1.05,
            rsi: 50.0,
            atr: 0.01,
            histogram: 0.001,
        });
        assert_eq!(analysis.signal, Signal::Hold);
        assert_eq!(analysis.confidence, 30);
    }

    #[test]
    fn narrow_spread_is_neutral_trend() {
        // Spread below the bias threshold: no directional trend.
        let analysis = run(&Setup {
            price: 1.10,
            ma50: 1.10001,
            ma200: 1.10000,
            rsi: 50.0,
            atr: 0.0005,
            histogram: 0.001,
        });
        assert_eq!(analysis.trend, Trend::Neutral);
        assert_eq!(analysis.condition, MarketCondition::Ranging);
    }

    #[test]
    fn confidence_always_within_bounds() {
        for rsi in [0.0, 10.0, 25.0, 50.0, 75.0, 90.0, 100.0] {
            for histogram in [-0.01, -0.00005, 0.0, 0.00005, 0.01] {
                for atr in [0.0001, 0.005] {
                    let analysis = run(&Setup {
                        price: 1.10,
                        ma50: 1.11,
                        ma200: 1.09,
                        rsi,
                        atr,
                        histogram,
                    });
                    assert!(analysis.confidence <= 99);
                }
            }
        }
    }
}
