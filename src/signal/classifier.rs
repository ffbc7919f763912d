use crate::config::SignalConfig;
use crate::indicators::IndicatorRow;
use crate::models::Side;

/// Map the latest indicator row to a direction. Pure; rule order matters
/// and the first match wins:
///
/// 1. ADX below the minimum -> no entry, whatever the EMAs/DIs say
/// 2. fast EMA above slow and +DI above -DI -> long
/// 3. fast EMA below slow and +DI below -DI -> short
/// 4. anything else -> no entry
pub fn classify(row: &IndicatorRow, config: &SignalConfig) -> Side {
    if row.adx < config.adx_min {
        return Side::NoEntry;
    }
    if row.ema_fast > row.ema_slow && row.plus_di > row.minus_di {
        return Side::Long;
    }
    if row.ema_fast < row.ema_slow && row.plus_di < row.minus_di {
        return Side::Short;
    }
    Side::NoEntry
}
