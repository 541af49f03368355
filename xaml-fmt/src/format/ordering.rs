//! Attribute ordering.
//!
//! Attributes are sorted by their rendered `name="value"` text. The default
//! policy puts identity attributes (`x:Key`, `x:Class`, `x:Name`) first, then
//! the default `xmlns` declaration, then every other prefixed attribute, and
//! finally plain attributes, each group in case-insensitive text order.

use std::any::Any;
use std::cmp::Ordering;
use std::panic::{self, AssertUnwindSafe};

use crate::constants::{IDENTITY_PREFIX, XMLNS};
use crate::error::{Error, Result};

/// A total order over rendered attribute texts.
pub trait AttributeOrdering {
    /// Compares two rendered attributes.
    fn compare(&self, a: &str, b: &str) -> Ordering;
}

impl<F> AttributeOrdering for F
where
    F: Fn(&str, &str) -> Ordering,
{
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self(a, b)
    }
}

/// The canonical XAML attribute order.
///
/// Comparison works on the lowercased text, so attributes that are equal
/// ignoring case are always `Equal` and group membership never depends on
/// case. That keeps the order a strict weak ordering.
#[derive(Debug, Clone, Copy, Default)]
pub struct XamlAttributeOrder;

/// Attribute groups, in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Group {
    Identity,
    DefaultNamespace,
    Prefixed,
    Plain,
}

fn group_of(lowered: &str) -> Group {
    let name = lowered.split('=').next().unwrap_or(lowered);
    let identity = name
        .strip_prefix(IDENTITY_PREFIX)
        .is_some_and(|rest| rest.starts_with(':'));

    if identity {
        Group::Identity
    } else if name == XMLNS {
        Group::DefaultNamespace
    } else if name.contains(':') {
        Group::Prefixed
    } else {
        Group::Plain
    }
}

impl AttributeOrdering for XamlAttributeOrder {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        match (a.is_empty(), b.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let a = a.to_lowercase();
        let b = b.to_lowercase();
        if a == b {
            return Ordering::Equal;
        }

        group_of(&a)
            .cmp(&group_of(&b))
            .then_with(|| a.cmp(&b))
    }
}

/// Sorts rendered attributes in place.
///
/// The sort is stable. A panic raised by the ordering is caught and reported
/// together with the attribute list being sorted.
pub fn sort_attributes<O>(ordering: &O, attributes: &mut [String]) -> Result<()>
where
    O: AttributeOrdering + ?Sized,
{
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        attributes.sort_by(|a, b| ordering.compare(a, b));
    }));

    outcome.map_err(|payload| Error::AttributeSort {
        attributes: attributes.join(", "),
        reason: panic_message(payload.as_ref()),
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "attribute comparison panicked".to_string()
    }
}
