//! Ticket book: pending legs and placed-bet history
//!
//! Owns the mutable betting state so the pricing components stay pure.
//! Legs enter only through range validation and carry the price and
//! volatility snapshot taken at acceptance; all later pricing of a leg
//! reuses that snapshot, never a fresh live value.

use super::aggregate;
use super::types::{Leg, LegQuote, ParlayQuote, ParlayTicket, PriceSnapshot, RangeError};
use super::validate::RangeValidator;
use crate::config::{Config, MarketCapTier};
use crate::model::{RangeModel, RangeParams, TanhRangeModel};
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A placed bet: the immutable ticket and the quote it was priced at
#[derive(Debug, Clone)]
pub struct PlacedTicket {
    pub ticket: ParlayTicket,
    pub quote: ParlayQuote,
}

/// Arena for pending legs and append-only bet history
pub struct TicketBook {
    config: Config,
    validator: RangeValidator,
    model: TanhRangeModel,
    pending: Vec<Leg>,
    history: Vec<PlacedTicket>,
}

impl TicketBook {
    /// Create a ticket book over the given reference data
    pub fn new(config: Config) -> Self {
        let validator = RangeValidator::new(&config);
        Self {
            config,
            validator,
            model: TanhRangeModel::new(),
            pending: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Validate and admit a leg, capturing the supplied snapshot.
    ///
    /// Returns the new leg's id, or the rejection without touching state.
    pub fn add_leg(
        &mut self,
        asset: &str,
        timeframe: &str,
        lower_bound: Decimal,
        upper_bound: Decimal,
        snapshot: PriceSnapshot,
    ) -> Result<Uuid, RangeError> {
        self.validator
            .validate(asset, timeframe, lower_bound, upper_bound, snapshot.price)?;

        let leg = Leg {
            id: Uuid::new_v4(),
            asset: asset.to_string(),
            timeframe: timeframe.to_string(),
            lower_bound,
            upper_bound,
            snapshot,
        };
        let id = leg.id;

        tracing::debug!(
            asset = %leg.asset,
            timeframe = %leg.timeframe,
            price = %snapshot.price,
            "leg admitted"
        );
        self.pending.push(leg);
        Ok(id)
    }

    /// Remove a pending leg; returns false if the id is unknown
    pub fn remove_leg(&mut self, id: Uuid) -> bool {
        let before = self.pending.len();
        self.pending.retain(|leg| leg.id != id);
        self.pending.len() < before
    }

    /// Pending legs, in the order they were added
    pub fn pending(&self) -> &[Leg] {
        &self.pending
    }

    /// Placed bets, newest last
    pub fn history(&self) -> &[PlacedTicket] {
        &self.history
    }

    /// Win probability for one leg, priced from its stored snapshot.
    ///
    /// A leg whose timeframe can no longer be resolved prices to 0,
    /// which voids any parlay containing it.
    pub fn leg_probability(&self, leg: &Leg) -> f64 {
        let Some(hours) = self.config.timeframe_hours(&leg.timeframe) else {
            return 0.0;
        };
        let tier = self
            .config
            .asset(&leg.asset)
            .map(|a| a.tier)
            .unwrap_or(MarketCapTier::Mid);

        self.model.probability(&RangeParams {
            current_price: leg.snapshot.price,
            lower_bound: leg.lower_bound,
            upper_bound: leg.upper_bound,
            daily_volatility: leg.snapshot.daily_volatility,
            timeframe_hours: hours,
            tier,
        })
    }

    /// Per-leg quotes for the pending ticket
    pub fn leg_quotes(&self) -> Vec<LegQuote> {
        self.pending
            .iter()
            .map(|leg| {
                let probability = self.leg_probability(leg);
                LegQuote {
                    leg_id: leg.id,
                    probability,
                    odds: aggregate::decimal_odds(probability),
                }
            })
            .collect()
    }

    /// Price the pending legs as one parlay for the given stake
    pub fn quote(&self, bet_amount: Decimal) -> ParlayQuote {
        let probabilities: Vec<f64> = self
            .pending
            .iter()
            .map(|leg| self.leg_probability(leg))
            .collect();
        aggregate::quote(&probabilities, bet_amount)
    }

    /// Finalize the pending legs into an immutable ticket.
    ///
    /// The ticket is priced at placement, appended to history and the
    /// pending list is cleared.
    pub fn place(&mut self, bet_amount: Decimal) -> PlacedTicket {
        let quote = self.quote(bet_amount);
        let ticket = ParlayTicket {
            legs: std::mem::take(&mut self.pending),
            bet_amount,
            placed_at: Utc::now(),
        };

        tracing::info!(
            legs = ticket.legs.len(),
            probability = quote.probability,
            odds = quote.odds,
            "parlay placed"
        );

        let placed = PlacedTicket { ticket, quote };
        self.history.push(placed.clone());
        placed
    }
}
