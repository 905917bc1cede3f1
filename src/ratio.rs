//! Unit ratios, the dimensional part of a [`Quantity`]

use std::{cmp::Ordering, sync::Arc};

use smallvec::SmallVec;

use crate::{quantity::Quantity, unit::Unit};

pub(crate) type UnitList = SmallVec<[Arc<Unit>; 4]>;

/// Product of the units in the numerator divided by the product of the units
/// in the denominator
///
/// A unit appearing more than once represents a power of that unit. Every
/// ratio returned by this crate is *canceled*: both lists are sorted by symbol
/// and no unit in the numerator is equal to one in the denominator.
///
/// Units are compared structurally (symbol and definition), so two units with
/// the same symbol but different definitions never cancel each other.
#[derive(Debug, Clone, Default)]
pub struct UnitRatio {
    numerator: UnitList,
    denominator: UnitList,
}

impl UnitRatio {
    /// The dimensionless ratio
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_unit(unit: Arc<Unit>) -> Self {
        let mut numerator = UnitList::new();
        numerator.push(unit);
        Self {
            numerator,
            denominator: UnitList::new(),
        }
    }

    /// Creates a new canceled ratio
    pub fn new(
        numerator: impl IntoIterator<Item = Arc<Unit>>,
        denominator: impl IntoIterator<Item = Arc<Unit>>,
    ) -> Self {
        Self {
            numerator: numerator.into_iter().collect(),
            denominator: denominator.into_iter().collect(),
        }
        .cancel()
    }

    pub fn numerator(&self) -> &[Arc<Unit>] {
        &self.numerator
    }

    pub fn denominator(&self) -> &[Arc<Unit>] {
        &self.denominator
    }

    pub fn into_parts(self) -> (Vec<Arc<Unit>>, Vec<Arc<Unit>>) {
        (self.numerator.into_vec(), self.denominator.into_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.numerator.is_empty() && self.denominator.is_empty()
    }

    /// The unit when the ratio is exactly one unit in the numerator
    pub fn singular(&self) -> Option<&Arc<Unit>> {
        match (self.numerator.as_slice(), self.denominator.is_empty()) {
            ([unit], true) => Some(unit),
            _ => None,
        }
    }

    /// Swaps numerator and denominator
    pub fn recip(&self) -> Self {
        Self {
            numerator: self.denominator.clone(),
            denominator: self.numerator.clone(),
        }
    }

    /// Raises the ratio to an integer power
    ///
    /// A power of 0 is the empty ratio and negative powers are the reciprocal
    /// of the positive power. Each unit is stored `|p|` times.
    pub fn pow(&self, p: i32) -> Self {
        let base = match p.cmp(&0) {
            Ordering::Equal => return Self::empty(),
            Ordering::Less => self.recip(),
            Ordering::Greater => self.clone(),
        };
        let n = p.unsigned_abs() as usize;
        let repeat = |list: &UnitList| -> UnitList {
            list.iter().cycle().take(list.len() * n).cloned().collect()
        };
        Self {
            numerator: repeat(&base.numerator),
            denominator: repeat(&base.denominator),
        }
        .cancel()
    }

    /// Groups equal units with their exponent
    ///
    /// Numerator units have positive exponents and denominator units negative
    /// ones. Groups keep the symbol order of the ratio.
    pub fn powers(&self) -> Vec<(&Arc<Unit>, i32)> {
        let mut out = Vec::new();
        for (list, sign) in [(&self.numerator, 1), (&self.denominator, -1)] {
            for run in runs(list) {
                out.extend(
                    group_units(run)
                        .into_iter()
                        .map(|(unit, count)| (unit, sign * count as i32)),
                );
            }
        }
        out
    }

    /// Checks if both ratios are equal or reduce to the same primitive units
    ///
    /// This is weaker than `==`: a named `N` is equivalent to `kg m/s^2` but
    /// not equal to it.
    pub fn equivalent(&self, other: &Self) -> bool {
        if self == other {
            return true;
        }
        self.reduce().units() == other.reduce().units()
    }

    /// Expresses the ratio in primitive units
    ///
    /// The returned quantity holds the multiplier from the original units to
    /// the primitive ones. Every non primitive unit is replaced by its
    /// definition until only primitive units remain. Units from the
    /// denominator of a definition go to the opposite side.
    #[tracing::instrument(level = "trace", skip_all, fields(units = %self), ret(Display))]
    pub fn reduce(&self) -> Quantity {
        let mut scalar = 1.0;
        let mut numerator = UnitList::new();
        let mut denominator = UnitList::new();

        let mut pending_num: Vec<Arc<Unit>> = self.numerator.to_vec();
        let mut pending_den: Vec<Arc<Unit>> = self.denominator.to_vec();
        let mut pass = 0;

        while !pending_num.is_empty() || !pending_den.is_empty() {
            pass += 1;
            for unit in std::mem::take(&mut pending_num) {
                if unit.is_primitive() {
                    numerator.push(unit);
                    continue;
                }
                let definition = unit.definition();
                scalar *= definition.scalar();
                pending_num.extend(definition.units().numerator.iter().cloned());
                pending_den.extend(definition.units().denominator.iter().cloned());
            }
            for unit in std::mem::take(&mut pending_den) {
                if unit.is_primitive() {
                    denominator.push(unit);
                    continue;
                }
                let definition = unit.definition();
                scalar /= definition.scalar();
                pending_den.extend(definition.units().numerator.iter().cloned());
                pending_num.extend(definition.units().denominator.iter().cloned());
            }
            tracing::trace!(
                pass,
                scalar,
                pending = pending_num.len() + pending_den.len(),
                "reduce pass"
            );
        }

        let units = Self {
            numerator,
            denominator,
        }
        .cancel();
        Quantity::new(scalar, units)
    }

    /// Sorts both lists by symbol and removes units present in both
    ///
    /// Within a run of units sharing a symbol, equal units are counted on
    /// each side and the smaller count cancels. Units with the same symbol
    /// but a different definition are kept.
    fn cancel(mut self) -> Self {
        self.numerator.sort_by(|a, b| a.symbol().cmp(b.symbol()));
        self.denominator.sort_by(|a, b| a.symbol().cmp(b.symbol()));

        let (num, den) = (&self.numerator, &self.denominator);
        let mut numerator = UnitList::new();
        let mut denominator = UnitList::new();
        let (mut n, mut d) = (0, 0);

        while n < num.len() && d < den.len() {
            match num[n].symbol().cmp(den[d].symbol()) {
                Ordering::Less => {
                    numerator.push(Arc::clone(&num[n]));
                    n += 1;
                }
                Ordering::Greater => {
                    denominator.push(Arc::clone(&den[d]));
                    d += 1;
                }
                Ordering::Equal => {
                    let n_end = n + run_len(&num[n..]);
                    let d_end = d + run_len(&den[d..]);
                    cancel_run(
                        &num[n..n_end],
                        &den[d..d_end],
                        &mut numerator,
                        &mut denominator,
                    );
                    n = n_end;
                    d = d_end;
                }
            }
        }
        numerator.extend(num[n..].iter().cloned());
        denominator.extend(den[d..].iter().cloned());

        tracing::trace!(
            canceled = num.len() - numerator.len(),
            "canceled units"
        );

        Self {
            numerator,
            denominator,
        }
    }
}

fn run_len(list: &[Arc<Unit>]) -> usize {
    match list.first() {
        Some(first) => list
            .iter()
            .take_while(|u| u.symbol() == first.symbol())
            .count(),
        None => 0,
    }
}

/// Splits a symbol sorted list into runs of units with the same symbol
fn runs(list: &[Arc<Unit>]) -> impl Iterator<Item = &[Arc<Unit>]> {
    let mut rest = list;
    std::iter::from_fn(move || {
        let current = rest;
        if current.is_empty() {
            return None;
        }
        let (run, tail) = current.split_at(run_len(current));
        rest = tail;
        Some(run)
    })
}

/// Equal units of a run with how many times each appears
///
/// The cost grows with the number of distinct units, which is usually one,
/// not with the length of the run.
fn group_units(run: &[Arc<Unit>]) -> Vec<(&Arc<Unit>, usize)> {
    let mut groups: Vec<(&Arc<Unit>, usize)> = Vec::new();
    for unit in run {
        let found = groups
            .iter_mut()
            .find(|(other, _)| Arc::ptr_eq(unit, *other) || unit == *other);
        match found {
            Some((_, count)) => *count += 1,
            None => groups.push((unit, 1)),
        }
    }
    groups
}

fn cancel_run(
    num: &[Arc<Unit>],
    den: &[Arc<Unit>],
    numerator: &mut UnitList,
    denominator: &mut UnitList,
) {
    let mut den_groups = group_units(den);
    for (unit, count) in group_units(num) {
        let left = match den_groups.iter_mut().find(|(other, _)| unit == *other) {
            Some((_, available)) => {
                let canceled = count.min(*available);
                *available -= canceled;
                count - canceled
            }
            None => count,
        };
        numerator.extend(std::iter::repeat(unit).take(left).cloned());
    }
    for (unit, count) in den_groups {
        denominator.extend(std::iter::repeat(unit).take(count).cloned());
    }
}

/// Same units regardless of their order
fn same_units(a: &[Arc<Unit>], b: &[Arc<Unit>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let a_groups = group_units(a);
    let b_groups = group_units(b);
    a_groups.len() == b_groups.len()
        && a_groups.iter().all(|(unit, count)| {
            b_groups
                .iter()
                .any(|(other, other_count)| count == other_count && unit == other)
        })
}

fn lists_eq(a: &[Arc<Unit>], b: &[Arc<Unit>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut a_runs = runs(a);
    let mut b_runs = runs(b);
    loop {
        match (a_runs.next(), b_runs.next()) {
            (None, None) => return true,
            (Some(x), Some(y)) => {
                if x[0].symbol() != y[0].symbol() || !same_units(x, y) {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

impl PartialEq for UnitRatio {
    fn eq(&self, other: &Self) -> bool {
        lists_eq(&self.numerator, &other.numerator)
            && lists_eq(&self.denominator, &other.denominator)
    }
}

impl std::ops::Mul<&UnitRatio> for &UnitRatio {
    type Output = UnitRatio;

    fn mul(self, rhs: &UnitRatio) -> UnitRatio {
        let mut numerator = self.numerator.clone();
        numerator.extend(rhs.numerator.iter().cloned());
        let mut denominator = self.denominator.clone();
        denominator.extend(rhs.denominator.iter().cloned());
        UnitRatio {
            numerator,
            denominator,
        }
        .cancel()
    }
}

impl std::ops::Div<&UnitRatio> for &UnitRatio {
    type Output = UnitRatio;

    fn div(self, rhs: &UnitRatio) -> UnitRatio {
        self * &rhs.recip()
    }
}

forward_binop!(Mul, mul, UnitRatio, UnitRatio, UnitRatio);
forward_binop!(Div, div, UnitRatio, UnitRatio, UnitRatio);
