use std::sync::Arc;

use dataset::{outcome_counts, LaunchTable};
use serde::{Deserialize, Serialize};
use shared::{
    domain::{LaunchRecord, Outcome, PayloadRange, SiteSelection, ALL_SITES},
    error::ApiError,
    protocol::{
        Axis, DashboardLayout, DropdownOption, Figure, FigureLayout, Legend, PayloadSlider,
        PieMarker, PieTrace, ScatterMarker, ScatterTrace, SiteDropdown, SliderMark, Title, Trace,
    },
};
use tracing::warn;

pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";
pub const PIE_CHART_ID: &str = "success-pie-chart";
pub const SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

const DASHBOARD_TITLE: &str = "V2 - SpaceX Launch Records Dashboard";
const PAYLOAD_AXIS_TITLE: &str = "Payload Mass (kg)";
const OUTCOME_AXIS_TITLE: &str = "Mission Outcome (0=Failed, 1=Success)";
const BOOSTER_LEGEND_TITLE: &str = "Booster Version Category";

/// Upper bound on slider steps, and so on the marks sent with the layout.
pub const MAX_SLIDER_MARKS: usize = 100;

// Plotly's default qualitative palette.
const CATEGORY_PALETTE: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

fn outcome_color(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Failure => "lightcoral",
        Outcome::Success => "mediumseagreen",
    }
}

/// Track bounds of the payload range control. These are fixed UI bounds;
/// the control's initial value comes from the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderSettings {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderSettings {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderSettings {
    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.step.is_finite()
            && self.min < self.max
            && self.step > 0.0
            && (self.max - self.min) / self.step <= MAX_SLIDER_MARKS as f64
    }

    fn marks(&self) -> Vec<SliderMark> {
        if !self.is_valid() {
            return vec![mark(self.min), mark(self.max)];
        }
        let count = ((self.max - self.min) / self.step).floor() as usize;
        (0..=count)
            .map(|i| mark(self.min + i as f64 * self.step))
            .collect()
    }
}

fn mark(value: f64) -> SliderMark {
    SliderMark {
        value,
        label: format!("{value}"),
    }
}

#[derive(Clone)]
pub struct DashboardContext {
    pub table: Arc<LaunchTable>,
    pub slider: SliderSettings,
}

impl DashboardContext {
    pub fn new(table: LaunchTable, slider: SliderSettings) -> Self {
        Self {
            table: Arc::new(table),
            slider,
        }
    }
}

pub fn dashboard_layout(ctx: &DashboardContext) -> DashboardLayout {
    let mut options = vec![DropdownOption {
        label: "All Sites".into(),
        value: ALL_SITES.into(),
    }];
    options.extend(ctx.table.sites().iter().map(|site| DropdownOption {
        label: site.clone(),
        value: site.clone(),
    }));

    let bounds = ctx.table.payload_bounds();
    DashboardLayout {
        title: DASHBOARD_TITLE.into(),
        site_dropdown: SiteDropdown {
            id: SITE_DROPDOWN_ID.into(),
            options,
            value: ALL_SITES.into(),
            placeholder: "Select a Launch Site here".into(),
            searchable: true,
        },
        payload_slider: PayloadSlider {
            id: PAYLOAD_SLIDER_ID.into(),
            min: ctx.slider.min,
            max: ctx.slider.max,
            step: ctx.slider.step,
            value: [bounds.low(), bounds.high()],
            marks: ctx.slider.marks(),
        },
        pie_chart_id: PIE_CHART_ID.into(),
        scatter_chart_id: SCATTER_CHART_ID.into(),
    }
}

/// Builds the payload range from optional query bounds. A missing bound falls
/// back to the dataset's own minimum or maximum.
pub fn resolve_payload_range(
    ctx: &DashboardContext,
    low: Option<f64>,
    high: Option<f64>,
) -> Result<PayloadRange, ApiError> {
    let bounds = ctx.table.payload_bounds();
    let range = PayloadRange::new(low.unwrap_or(bounds.low()), high.unwrap_or(bounds.high()))?;
    Ok(range)
}

/// Success/failure proportions for the selected site. Both outcomes are always
/// present as slices, even when one count is zero.
pub fn success_pie_chart(ctx: &DashboardContext, site: &SiteSelection) -> Figure {
    warn_if_unknown(ctx, site);
    let counts = outcome_counts(ctx.table.select_site(site));

    let title = match site {
        SiteSelection::All => "Total Success and Failed Launches (All Sites)".to_string(),
        SiteSelection::Site(name) => format!("Success and Failed Launches for {name}"),
    };

    Figure {
        data: vec![Trace::Pie(PieTrace {
            labels: Outcome::ALL.iter().map(|o| o.label().to_string()).collect(),
            values: Outcome::ALL.iter().map(|o| counts.get(*o)).collect(),
            marker: PieMarker {
                colors: Outcome::ALL
                    .iter()
                    .map(|o| outcome_color(*o).to_string())
                    .collect(),
            },
            sort: false,
        })],
        layout: FigureLayout {
            title: Title::new(title),
            xaxis: None,
            yaxis: None,
            legend: None,
        },
    }
}

/// Payload against outcome for rows within `range` at the selected site, one
/// trace per booster category.
pub fn success_payload_scatter(
    ctx: &DashboardContext,
    site: &SiteSelection,
    range: &PayloadRange,
) -> Figure {
    warn_if_unknown(ctx, site);
    let rows = ctx.table.select(site, range);

    let subject = match site {
        SiteSelection::All => "All Sites",
        SiteSelection::Site(name) => name.as_str(),
    };
    let title = format!(
        "Payload vs. Outcome for {subject} (Payload: {}-{} kg)",
        range.low(),
        range.high()
    );

    let data = ctx
        .table
        .booster_categories()
        .iter()
        .enumerate()
        .filter_map(|(index, category)| {
            let points: Vec<&LaunchRecord> = rows
                .iter()
                .copied()
                .filter(|r| &r.booster_category == category)
                .collect();
            if points.is_empty() {
                return None;
            }
            Some(Trace::Scatter(ScatterTrace {
                name: category.clone(),
                legendgroup: category.clone(),
                mode: "markers".into(),
                x: points.iter().map(|r| r.payload_mass_kg).collect(),
                y: points.iter().map(|r| r.outcome.class()).collect(),
                marker: ScatterMarker {
                    color: CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()].into(),
                },
            }))
        })
        .collect();

    Figure {
        data,
        layout: FigureLayout {
            title: Title::new(title),
            xaxis: Some(Axis {
                title: Title::new(PAYLOAD_AXIS_TITLE),
            }),
            yaxis: Some(Axis {
                title: Title::new(OUTCOME_AXIS_TITLE),
            }),
            legend: Some(Legend {
                title: Title::new(BOOSTER_LEGEND_TITLE),
            }),
        },
    }
}

fn warn_if_unknown(ctx: &DashboardContext, site: &SiteSelection) {
    if let SiteSelection::Site(name) = site {
        if !ctx.table.has_site(name) {
            warn!(site = %name, "selected launch site is not in the dataset");
        }
    }
}
