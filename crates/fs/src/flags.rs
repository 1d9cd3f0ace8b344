use bitflags::bitflags;

bitflags! {
    /// Attributes of a `FileRecord` that hold observed values.
    ///
    /// Derived from the record on demand; the record itself stores each
    /// attribute as an `Option`, so the two can never disagree.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Fields: u8 {
        const NAME        = 0b0000_0001;
        const KIND        = 0b0000_0010;
        const MODE        = 0b0000_0100;
        /// Exact modification date.
        const DATE        = 0b0000_1000;
        /// Modification date with coarse resolution (minutes or days).
        const DATE_COARSE = 0b0001_0000;
        const SIZE        = 0b0010_0000;
        const SYMLINK     = 0b0100_0000;
    }
}

bitflags! {
    /// Checks a comparison should skip or relax.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct IgnoreFlags: u8 {
        /// Never compare dates.
        const DATE          = 0b0000_0001;
        /// Never compare sizes.
        const SIZE          = 0b0000_0010;
        /// Skip the date check when the left side is strictly older.
        const DATE_IF_OLDER = 0b0000_0100;
        /// Skip the size check when both dates are known and the left side
        /// is strictly older.
        const SIZE_IF_OLDER = 0b0000_1000;
    }
}

impl Fields {
    /// Either kind of modification date.
    #[inline]
    pub fn any_date() -> Fields {
        Fields::DATE | Fields::DATE_COARSE
    }
}
