// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::FinanceApi;
use crate::events::{RefreshBus, Topic};
use crate::models::Period;
use crate::notify::Subscription;
use crate::summary::{aggregate_summary, ChartSeries};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::warn;

/// Income/expense chart for one reporting period. Fetch failures show the
/// zero summary.
pub struct Dashboard {
    series: Rc<RefCell<ChartSeries>>,
    api: Rc<dyn FinanceApi>,
    period: Period,
    _sub: Subscription,
}

impl Dashboard {
    pub fn mount(api: Rc<dyn FinanceApi>, bus: &RefreshBus, period: Period) -> Self {
        let series = Rc::new(RefCell::new(ChartSeries::default()));
        let weak = Rc::downgrade(&series);
        let handler_api = Rc::clone(&api);
        let sub = bus.subscribe(
            &Topic::TRANSACTIONS_CHANGED,
            Rc::new(move || load_series(&weak, handler_api.as_ref(), period)),
        );
        let d = Self {
            series,
            api,
            period,
            _sub: sub,
        };
        d.reload();
        d
    }

    pub fn reload(&self) {
        load_series(&Rc::downgrade(&self.series), self.api.as_ref(), self.period);
    }

    pub fn period(&self) -> Period {
        self.period
    }

    pub fn series(&self) -> ChartSeries {
        self.series.borrow().clone()
    }
}

fn load_series(target: &Weak<RefCell<ChartSeries>>, api: &dyn FinanceApi, period: Period) {
    let series = match api.summary(period) {
        Ok(s) => match aggregate_summary(&s) {
            Ok(series) => series,
            Err(e) => {
                warn!(error = %e, period = period.as_str(), "summary totals unrepresentable; showing zeros");
                ChartSeries::default()
            }
        },
        Err(e) => {
            warn!(error = %e, period = period.as_str(), "failed to load summary; showing zeros");
            ChartSeries::default()
        }
    };
    if let Some(t) = target.upgrade() {
        *t.borrow_mut() = series;
    }
}
