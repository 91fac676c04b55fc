// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

/// A phantom-marked identifier so ids from different entity spaces cannot
/// be mixed up.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub const fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

/// Marks whether a stopover is free to be assigned a slot by the solver or
/// already resides at a known slot.
pub trait Kind: Clone {
    const NAME: &'static str;
}

/// A stopover whose position the solver chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FlexibleKind;

impl Kind for FlexibleKind {
    const NAME: &'static str = "Flexible";
}

impl std::fmt::Display for FlexibleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

/// Inventory already resident at plan start, pinned to its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinnedKind;

impl Kind for PinnedKind {
    const NAME: &'static str = "Pinned";
}

impl std::fmt::Display for PinnedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Self::NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct DemoMarker;

    impl IdentifierMarkerName for DemoMarker {
        const NAME: &'static str = "DemoId";
    }

    #[test]
    fn test_identifier_display_uses_marker_name() {
        let id: Identifier<u32, DemoMarker> = Identifier::new(3);
        assert_eq!(format!("{id}"), "DemoId(3)");
    }

    #[test]
    fn test_identifier_ordering_follows_inner() {
        let a: Identifier<u32, DemoMarker> = Identifier::new(1);
        let b: Identifier<u32, DemoMarker> = Identifier::new(2);
        assert!(a < b);
        assert_eq!(a.into_inner(), 1);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FlexibleKind::NAME, "Flexible");
        assert_eq!(PinnedKind::NAME, "Pinned");
    }
}
