use super::binding::{Banner, BannerTone, Field, Region, Table, TableRow, View};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use std::collections::HashMap;
use std::time::Duration;

/// In-memory dashboard page.
///
/// Holds exactly what a browser DOM would after the render routines ran, and
/// serialises it with [`Document::to_html`].
#[derive(Debug, Default, Clone)]
pub struct Document {
    visible: HashMap<Region, bool>,
    texts: HashMap<Field, String>,
    classes: HashMap<Field, &'static str>,
    rows: HashMap<Table, Vec<TableRow>>,
    banner: Option<Banner>,
}

impl View for Document {
    fn set_visible(&mut self, region: Region, visible: bool) {
        self.visible.insert(region, visible);
    }

    fn set_text(&mut self, field: Field, text: String) {
        self.texts.insert(field, text);
    }

    fn set_class(&mut self, field: Field, class: &'static str) {
        self.classes.insert(field, class);
    }

    fn set_rows(&mut self, table: Table, rows: Vec<TableRow>) {
        self.rows.insert(table, rows);
    }

    fn show_banner(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }

    fn hide_banner(&mut self) {
        self.banner = None;
    }
}

impl Document {
    pub fn is_visible(&self, region: Region) -> bool {
        self.visible.get(&region).copied().unwrap_or(false)
    }

    pub fn text(&self, field: Field) -> Option<&str> {
        self.texts.get(&field).map(String::as_str)
    }

    pub fn class(&self, field: Field) -> Option<&'static str> {
        self.classes.get(&field).copied()
    }

    pub fn rows(&self, table: Table) -> &[TableRow] {
        self.rows.get(&table).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Full page. `refresh_after` adds a meta refresh back to `/`.
    pub fn to_html(&self, refresh_after: Option<Duration>) -> String {
        let refresh = refresh_after
            .map(|d| format!("{};url=/", ((d.as_millis() + 999) / 1000).max(1)));

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    title { "Kite Portfolio Dashboard" }
                    @if let Some(content) = &refresh {
                        meta http-equiv="refresh" content=(content);
                    }
                    style { (PreEscaped(STYLE)) }
                }
                body {
                    h1 { "Kite Portfolio Dashboard" }
                    (self.region(Region::Loading, html! { p { "Loading..." } }))
                    (self.banner_markup())
                    (self.region(Region::NotAuthenticated, html! {
                        p { "You are not logged in." }
                        a id="login-btn" class="button" href="/login" { "Login with Kite" }
                    }))
                    (self.region(Region::Authenticated, html! {
                        p { "Welcome, " (self.field(Field::UserName)) }
                        form method="post" action="/refresh" {
                            button id="refresh-btn" type="submit" { "Refresh" }
                        }
                    }))
                    (self.region(Region::Profile, html! {
                        h2 { "Profile" }
                        (self.definitions(&[
                            ("User ID", Field::ProfileUserId),
                            ("Name", Field::ProfileUserName),
                            ("Email", Field::ProfileEmail),
                            ("Broker", Field::ProfileBroker),
                        ]))
                    }))
                    (self.region(Region::Summary, html! {
                        h2 { "Summary" }
                        (self.definitions(&[
                            ("Total Value", Field::SummaryTotalValue),
                            ("Total P&L", Field::SummaryTotalPnl),
                            ("Holdings P&L", Field::SummaryHoldingsPnl),
                            ("Positions P&L", Field::SummaryPositionsPnl),
                            ("Holdings", Field::SummaryHoldingsCount),
                            ("Positions", Field::SummaryPositionsCount),
                        ]))
                    }))
                    (self.region(Region::Holdings, self.table(Table::Holdings, "Holdings")))
                    (self.region(Region::Positions, self.table(Table::Positions, "Positions")))
                    footer {
                        "Generated "
                        (chrono::Local::now().format("%d %b %Y %H:%M:%S").to_string())
                    }
                }
            }
        }
        .into_string()
    }

    fn region(&self, region: Region, body: Markup) -> Markup {
        let style = (!self.is_visible(region)).then_some("display:none");
        html! {
            div id=(region.id()) style=[style] { (body) }
        }
    }

    fn banner_markup(&self) -> Markup {
        html! {
            @match &self.banner {
                Some(banner) => {
                    div id="error" class=(banner_class(banner.tone)) { (banner.message) }
                }
                None => {
                    div id="error" class="banner" style="display:none" {}
                }
            }
        }
    }

    fn field(&self, field: Field) -> Markup {
        html! {
            span id=(field.id()) class=[self.class(field)] {
                (self.text(field).unwrap_or_default())
            }
        }
    }

    fn definitions(&self, entries: &[(&str, Field)]) -> Markup {
        html! {
            dl {
                @for (label, field) in entries {
                    dt { (label) }
                    dd { (self.field(*field)) }
                }
            }
        }
    }

    fn table(&self, table: Table, title: &str) -> Markup {
        html! {
            h2 { (title) }
            table {
                thead {
                    tr {
                        th { "Symbol" } th { "Qty" } th { "Avg Price" } th { "LTP" } th { "P&L" }
                    }
                }
                tbody id=(table.id()) {
                    @for row in self.rows(table) {
                        @match row {
                            TableRow::Placeholder { message, colspan } => {
                                tr { td colspan=(colspan) { (message) } }
                            }
                            TableRow::Data(cells) => {
                                tr {
                                    @for cell in cells {
                                        td class=[cell.class] { (cell.text) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn banner_class(tone: BannerTone) -> &'static str {
    match tone {
        BannerTone::Error => "banner error",
        BannerTone::Success => "banner success",
    }
}

const STYLE: &str = "
body { font-family: sans-serif; margin: 2rem; }
.banner { padding: 0.75rem 1rem; border: 1px solid; border-radius: 4px; margin: 1rem 0; }
.banner.error { background-color: #ffebee; border-color: #f44336; color: #c62828; }
.banner.success { background-color: #e8f5e9; border-color: #4caf50; color: #2e7d32; }
.pnl.positive { color: #2e7d32; }
.pnl.negative { color: #c62828; }
table { border-collapse: collapse; width: 100%; }
th, td { padding: 0.4rem 0.6rem; border-bottom: 1px solid #ddd; text-align: left; }
footer { margin-top: 2rem; color: #888; font-size: 0.8rem; }
";
