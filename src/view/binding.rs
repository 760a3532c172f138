/// Named display regions, toggled with a plain show/hide convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Loading,
    NotAuthenticated,
    Authenticated,
    Profile,
    Summary,
    Holdings,
    Positions,
}

impl Region {
    pub fn id(self) -> &'static str {
        match self {
            Region::Loading => "loading",
            Region::NotAuthenticated => "not-authenticated",
            Region::Authenticated => "authenticated",
            Region::Profile => "profile-section",
            Region::Summary => "summary-section",
            Region::Holdings => "holdings-section",
            Region::Positions => "positions-section",
        }
    }
}

/// Single-value text slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    UserName,
    ProfileUserId,
    ProfileUserName,
    ProfileEmail,
    ProfileBroker,
    SummaryTotalValue,
    SummaryTotalPnl,
    SummaryHoldingsPnl,
    SummaryPositionsPnl,
    SummaryHoldingsCount,
    SummaryPositionsCount,
}

impl Field {
    pub fn id(self) -> &'static str {
        match self {
            Field::UserName => "user-name",
            Field::ProfileUserId => "profile-user-id",
            Field::ProfileUserName => "profile-user-name",
            Field::ProfileEmail => "profile-email",
            Field::ProfileBroker => "profile-broker",
            Field::SummaryTotalValue => "summary-total-value",
            Field::SummaryTotalPnl => "summary-total-pnl",
            Field::SummaryHoldingsPnl => "summary-holdings-pnl",
            Field::SummaryPositionsPnl => "summary-positions-pnl",
            Field::SummaryHoldingsCount => "summary-holdings-count",
            Field::SummaryPositionsCount => "summary-positions-count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Holdings,
    Positions,
}

impl Table {
    pub fn id(self) -> &'static str {
        match self {
            Table::Holdings => "holdings-tbody",
            Table::Positions => "positions-tbody",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub text: String,
    pub class: Option<&'static str>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn classed(text: impl Into<String>, class: &'static str) -> Self {
        Self {
            text: text.into(),
            class: Some(class),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// One cell spanning `colspan` columns (the "no data" row).
    Placeholder { message: String, colspan: usize },
    Data(Vec<Cell>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerTone {
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub tone: BannerTone,
    pub message: String,
}

/// Update surface the render routines write into.
///
/// Implementations map each logical slot to whatever backs it (an in-memory
/// document for server rendering, a recorder in tests).
pub trait View: Send {
    fn set_visible(&mut self, region: Region, visible: bool);
    fn set_text(&mut self, field: Field, text: String);
    fn set_class(&mut self, field: Field, class: &'static str);
    /// Replaces every row of `table`.
    fn set_rows(&mut self, table: Table, rows: Vec<TableRow>);
    fn show_banner(&mut self, banner: Banner);
    fn hide_banner(&mut self);
}
