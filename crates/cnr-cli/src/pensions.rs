//! # Pension listing subcommands
//!
//! `cnr pensions` renders one page of the working set as a text table,
//! followed by the per-dimension summary counts and the pagination
//! footer. `cnr show <id>` prints a single case in full.
//!
//! Region filtering happens server-side (and is echoed locally); category
//! and benefit filters are applied by the local derivation pipeline.

use anyhow::Result;
use clap::Args;

use cnr_core::{
    classify_age_bucket, FilterState, PageSize, PensionRecord, Sex, Summary, Wilaya,
};
use cnr_dashboard::DerivedView;

use crate::{build_controller, parse_avantage, parse_category, parse_wilaya};

/// Filter selections shared by `cnr pensions` and `cnr stats`.
#[derive(Args, Debug, Default)]
pub struct SelectionArgs {
    /// Region filter: an official wilaya code (1..=58) or an exact French
    /// name.
    #[arg(long)]
    pub wilaya: Option<String>,

    /// TP category filter ("décès", "fin droit", "révision"). Repeatable.
    #[arg(long)]
    pub category: Vec<String>,

    /// Benefit-label filter ("direct", "Veuves", "fille majeur",
    /// "(Vide)"). Repeatable.
    #[arg(long)]
    pub avantage: Vec<String>,

    /// Select every recognized benefit label at once.
    #[arg(long, conflicts_with = "avantage")]
    pub all_avantages: bool,
}

impl SelectionArgs {
    /// Build the filter these selections describe, leaving the cursor at
    /// its default.
    pub fn to_filter(&self) -> Result<FilterState> {
        let mut filter = FilterState::new();
        if let Some(raw) = &self.wilaya {
            filter.wilaya = Some(parse_wilaya(raw)?);
        }
        for raw in &self.category {
            filter.categories.insert(parse_category(raw)?);
        }
        for raw in &self.avantage {
            filter.avantages.labels.insert(parse_avantage(raw)?);
        }
        if self.all_avantages {
            filter.avantages.select_all = true;
        }
        Ok(filter)
    }
}

/// Arguments for `cnr pensions`.
#[derive(Args, Debug)]
pub struct PensionsArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Page to fetch (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Rows per page: 10, 25, 50, or 100.
    #[arg(long, default_value_t = 10)]
    pub limit: u32,
}

/// Arguments for `cnr show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Case identifier.
    pub id: u64,
}

/// Execute `cnr pensions`.
pub async fn run_pensions(args: &PensionsArgs) -> Result<u8> {
    let mut filter = args.selection.to_filter()?;
    filter.page.set_size(PageSize::new(args.limit)?);

    let mut controller = build_controller()?;
    controller.set_filter(filter).await?;

    // The cursor clamps against the backend's total, so a page request
    // can only be honored once the first fetch has established it.
    if args.page != 1 {
        controller.set_page(args.page).await?;
    }

    let view = controller.derived();
    print_table(&view);
    print_summary(&view.summary);

    let cursor = &controller.filter().page;
    println!(
        "page {}/{} — {} records total",
        cursor.page(),
        cursor.total_pages(),
        cursor.total()
    );
    Ok(0)
}

/// Execute `cnr show`.
pub async fn run_show(args: &ShowArgs) -> Result<u8> {
    let mut controller = build_controller()?;
    let record = controller.pension(args.id).await?;
    print_record(&record);
    Ok(0)
}

fn wilaya_label(record: &PensionRecord) -> String {
    match Wilaya::from_code(record.wilaya_code) {
        Ok(w) => w.to_string(),
        Err(_) => record.wilaya_code.to_string(),
    }
}

fn category_label(record: &PensionRecord) -> String {
    classify_age_bucket(record.age_moyen_cat)
        .map(|c| c.to_string())
        .unwrap_or_default()
}

fn avantage_label(record: &PensionRecord) -> String {
    record
        .avantage
        .label()
        .map(|l| l.to_string())
        .unwrap_or_default()
}

fn sex_label(sexe: Option<Sex>) -> &'static str {
    match sexe {
        Some(Sex::Male) => "M",
        Some(Sex::Female) => "F",
        None => "-",
    }
}

fn print_table(view: &DerivedView<'_>) {
    println!(
        "{:<12} {:<22} {:<10} {:<13} {:<13} {:<4} {:>12}",
        "N° PENSION", "WILAYA", "CATEGORIE", "AVANTAGE", "RISQUE", "SEXE", "NET MENS"
    );
    for record in &view.filtered {
        println!(
            "{:<12} {:<22} {:<10} {:<13} {:<13} {:<4} {:>12.2}",
            record.numero,
            wilaya_label(record),
            category_label(record),
            avantage_label(record),
            record.niveau_risque.level().to_string(),
            sex_label(record.sexe),
            record.net_mens,
        );
    }
    if view.filtered.is_empty() {
        println!("(no records match the current filter)");
    }
    println!();
}

fn print_summary(summary: &Summary) {
    println!("Total: {}", summary.total);
    println!(
        "Wilaya: {} ({}%)  Avantage: {} ({}%)  Catégorie: {} ({}%)",
        summary.wilaya.count,
        summary.wilaya.percentage_label(),
        summary.avantage.count,
        summary.avantage.percentage_label(),
        summary.categorie.count,
        summary.categorie.percentage_label(),
    );
}

fn print_record(record: &PensionRecord) {
    println!("N° pension:    {}", record.numero);
    println!("Wilaya:        {}", wilaya_label(record));
    println!("État:          {}", record.etat);
    println!("Catégorie:     {}", category_label(record));
    println!(
        "Avantage:      {} ({})",
        avantage_label(record),
        record.avantage
    );
    println!(
        "Risque prédit: {} ({})",
        record.niveau_risque.level(),
        record.niveau_risque
    );
    println!("Sexe:          {}", sex_label(record.sexe));
    if let Some(date) = record.date_naissance {
        println!("Naissance:     {}", date.format("%Y-%m-%d"));
    }
    if let Some(date) = record.date_jouissance {
        println!("Jouissance:    {}", date.format("%Y-%m-%d"));
    }
    println!("Durée pension: {:.1} ans", record.duree_pension);
    println!(
        "Taux:          direct {:.1}%  global {:.1}%  réversion {:.1}%",
        record.taux_d, record.taux_glb, record.taux_rv
    );
    println!("Net mensuel:   {:.2} DZD", record.net_mens);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cnr_core::{BenefitLabel, TpCategory};

    #[test]
    fn selection_args_build_filter() {
        let args = SelectionArgs {
            wilaya: Some("16".to_string()),
            category: vec!["décès".to_string(), "revision".to_string()],
            avantage: vec!["direct".to_string()],
            all_avantages: false,
        };
        let filter = args.to_filter().unwrap();
        assert_eq!(filter.wilaya.unwrap().code(), 16);
        assert!(filter.categories.contains(&TpCategory::Deces));
        assert!(filter.categories.contains(&TpCategory::Revision));
        assert!(filter.avantages.labels.contains(&BenefitLabel::Direct));
        assert!(!filter.avantages.select_all);
    }

    #[test]
    fn select_all_sets_sentinel() {
        let args = SelectionArgs {
            all_avantages: true,
            ..SelectionArgs::default()
        };
        let filter = args.to_filter().unwrap();
        assert!(filter.avantages.select_all);
        assert!(filter.avantages.labels.is_empty());
    }

    #[test]
    fn bad_selection_is_rejected() {
        let args = SelectionArgs {
            wilaya: Some("99".to_string()),
            ..SelectionArgs::default()
        };
        assert!(args.to_filter().is_err());

        let args = SelectionArgs {
            category: vec!["retraite".to_string()],
            ..SelectionArgs::default()
        };
        assert!(args.to_filter().is_err());
    }
}
