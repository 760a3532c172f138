use super::binding::{Banner, BannerTone, Cell, Field, Region, Table, TableRow, View};
use super::format::{format_money, format_pnl, format_quantity, pnl_class, PLACEHOLDER};
use crate::backend::types::non_empty;
use crate::backend::{DashboardSummary, Holding, Position, UserProfile};

const TABLE_COLUMNS: usize = 5;

pub fn show_loading<V: View + ?Sized>(view: &mut V) {
    view.set_visible(Region::Loading, true);
}

pub fn hide_loading<V: View + ?Sized>(view: &mut V) {
    view.set_visible(Region::Loading, false);
}

pub fn show_error<V: View + ?Sized>(view: &mut V, message: impl Into<String>) {
    view.show_banner(Banner {
        tone: BannerTone::Error,
        message: message.into(),
    });
}

pub fn show_success<V: View + ?Sized>(view: &mut V, message: impl Into<String>) {
    view.show_banner(Banner {
        tone: BannerTone::Success,
        message: message.into(),
    });
}

pub fn hide_error<V: View + ?Sized>(view: &mut V) {
    view.hide_banner();
}

pub fn show_not_authenticated_ui<V: View + ?Sized>(view: &mut V) {
    view.set_visible(Region::NotAuthenticated, true);
    view.set_visible(Region::Authenticated, false);
    for region in [
        Region::Profile,
        Region::Summary,
        Region::Holdings,
        Region::Positions,
    ] {
        view.set_visible(region, false);
    }
}

pub fn show_authenticated_ui<V: View + ?Sized>(view: &mut V, user: Option<&UserProfile>) {
    view.set_visible(Region::NotAuthenticated, false);
    view.set_visible(Region::Authenticated, true);
    let name = user.map(UserProfile::display_name).unwrap_or("User");
    view.set_text(Field::UserName, name.to_string());
}

pub fn display_profile<V: View + ?Sized>(view: &mut V, profile: &UserProfile) {
    let text = |v: &Option<String>| non_empty(v.as_deref()).unwrap_or(PLACEHOLDER).to_string();
    view.set_text(Field::ProfileUserId, text(&profile.user_id));
    view.set_text(Field::ProfileUserName, text(&profile.user_name));
    view.set_text(Field::ProfileEmail, text(&profile.email));
    view.set_text(Field::ProfileBroker, text(&profile.broker));
    view.set_visible(Region::Profile, true);
}

pub fn display_summary<V: View + ?Sized>(view: &mut V, summary: &DashboardSummary) {
    view.set_text(Field::SummaryTotalValue, format_money(summary.total_value));

    for (field, value) in [
        (Field::SummaryTotalPnl, summary.total_pnl),
        (Field::SummaryHoldingsPnl, summary.holdings_pnl),
        (Field::SummaryPositionsPnl, summary.positions_pnl),
    ] {
        view.set_text(field, format_pnl(value));
        view.set_class(field, pnl_class(value));
    }

    view.set_text(Field::SummaryHoldingsCount, summary.holdings_count.to_string());
    view.set_text(Field::SummaryPositionsCount, summary.positions_count.to_string());
    view.set_visible(Region::Summary, true);
}

pub fn display_holdings<V: View + ?Sized>(view: &mut V, holdings: &[Holding]) {
    let rows = if holdings.is_empty() {
        vec![placeholder_row("No holdings found")]
    } else {
        holdings
            .iter()
            .map(|h| {
                position_row(
                    h.tradingsymbol.as_deref(),
                    h.quantity,
                    h.average_price,
                    h.last_price,
                    h.pnl(),
                )
            })
            .collect()
    };
    view.set_rows(Table::Holdings, rows);
    view.set_visible(Region::Holdings, true);
}

pub fn display_positions<V: View + ?Sized>(view: &mut V, positions: &[Position]) {
    let rows = if positions.is_empty() {
        vec![placeholder_row("No positions found")]
    } else {
        positions
            .iter()
            .map(|p| {
                position_row(
                    p.tradingsymbol.as_deref(),
                    p.quantity,
                    p.average_price,
                    p.last_price,
                    p.pnl,
                )
            })
            .collect()
    };
    view.set_rows(Table::Positions, rows);
    view.set_visible(Region::Positions, true);
}

fn placeholder_row(message: &str) -> TableRow {
    TableRow::Placeholder {
        message: message.to_string(),
        colspan: TABLE_COLUMNS,
    }
}

fn position_row(
    symbol: Option<&str>,
    quantity: f64,
    average_price: f64,
    last_price: f64,
    pnl: f64,
) -> TableRow {
    TableRow::Data(vec![
        Cell::plain(non_empty(symbol).unwrap_or(PLACEHOLDER)),
        Cell::plain(format_quantity(quantity)),
        Cell::plain(format_money(average_price)),
        Cell::plain(format_money(last_price)),
        Cell::classed(format_pnl(pnl), pnl_class(pnl)),
    ])
}
