//! The visibility filter.

use std::collections::HashSet;

use crate::auth::SessionUser;
use crate::model::{Call, Fundraiser, Lead, Payment};

/// Filters collections down to what one user may see.
#[derive(Debug, Clone, Copy)]
pub struct Visibility<'u> {
    user: &'u SessionUser,
}

impl<'u> Visibility<'u> {
    /// Creates the filter for a user.
    #[must_use]
    pub const fn for_user(user: &'u SessionUser) -> Self {
        Self { user }
    }

    /// Returns true if no filtering applies.
    #[must_use]
    pub const fn is_unrestricted(&self) -> bool {
        self.user.is_admin()
    }

    /// Leads owned by the user.
    #[must_use]
    pub fn leads<'r>(&self, leads: &'r [Lead]) -> Vec<&'r Lead> {
        self.keep(leads, |l| l.owner == self.user.email)
    }

    /// Returns true if the user may see the lead.
    #[must_use]
    pub fn can_see_lead(&self, lead: &Lead) -> bool {
        self.is_unrestricted() || lead.owner == self.user.email
    }

    /// Fundraisers owned by the user.
    #[must_use]
    pub fn fundraisers<'r>(&self, fundraisers: &'r [Fundraiser]) -> Vec<&'r Fundraiser> {
        self.keep(fundraisers, |f| f.owner == self.user.email)
    }

    /// Returns true if the user may see the fundraiser.
    #[must_use]
    pub fn can_see_fundraiser(&self, fundraiser: &Fundraiser) -> bool {
        self.is_unrestricted() || fundraiser.owner == self.user.email
    }

    /// Calls logged by the user.
    #[must_use]
    pub fn calls<'r>(&self, calls: &'r [Call]) -> Vec<&'r Call> {
        self.keep(calls, |c| c.by == self.user.email)
    }

    /// Payments the user recorded or that credit one of the user's fundraisers.
    #[must_use]
    pub fn payments<'r>(
        &self,
        payments: &'r [Payment],
        fundraisers: &[Fundraiser],
    ) -> Vec<&'r Payment> {
        let own_funds: HashSet<_> = self
            .fundraisers(fundraisers)
            .into_iter()
            .map(|f| &f.id)
            .collect();

        self.keep(payments, |p| {
            own_funds.contains(&p.fund_id) || p.recorded_by == self.user.email
        })
    }

    /// Records of collections without ownership; always unfiltered.
    #[must_use]
    pub fn unrestricted<'r, T>(&self, records: &'r [T]) -> Vec<&'r T> {
        records.iter().collect()
    }

    fn keep<'r, T>(&self, records: &'r [T], owned: impl Fn(&T) -> bool) -> Vec<&'r T> {
        if self.is_unrestricted() {
            return records.iter().collect();
        }
        records.iter().filter(|r| owned(r)).collect()
    }
}
