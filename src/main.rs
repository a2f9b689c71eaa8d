use anyhow::{bail, Context, Result};
use std::time::Duration;

use meal_prep::cli::{parse_args, Cli};
use meal_prep::config::{ClientConfig, EnrichmentPolicy, ServiceConfig};
use meal_prep::logging::init_logging;
use meal_prep::pantry::load_checklist;
use meal_prep::recipe_aggregator::{RecipeAggregationService, RecipeSearchOutcome};
use meal_prep::SpoonacularClient;

async fn collect_ingredients(cli: &Cli) -> Result<Vec<String>> {
    let mut ingredients = cli.ingredients.clone();
    if let Some(path) = &cli.pantry_file {
        for item in load_checklist(path).await? {
            if !ingredients.iter().any(|i| i.eq_ignore_ascii_case(&item)) {
                ingredients.push(item);
            }
        }
    }
    Ok(ingredients)
}

fn print_outcome(outcome: &RecipeSearchOutcome) {
    if outcome.recipes.is_empty() {
        println!("No recipes found.");
    }
    for (idx, recipe) in outcome.recipes.iter().enumerate() {
        let calories = recipe
            .nutrition()
            .calories()
            .map(|kcal| format!("{:.0} kcal", kcal))
            .unwrap_or_else(|| "kcal unknown".to_string());
        println!(
            "{}. {} (#{}) - {} servings, {}",
            idx + 1,
            recipe.title(),
            recipe.id(),
            recipe.servings(),
            calories
        );
        println!("   uses: {}", recipe.used_ingredients().join(", "));
        if !recipe.missed_ingredients().is_empty() {
            println!("   also needs: {}", recipe.missed_ingredients().join(", "));
        }
        println!("   {}", recipe.source_url());
    }
    if !outcome.failures.is_empty() {
        println!("\nCould not load nutrition for:");
        for failure in &outcome.failures {
            println!("   - {} (#{}): {}", failure.title, failure.id, failure.error);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = parse_args();
    init_logging(cli.verbose);

    let ingredients = collect_ingredients(&cli).await?;
    if ingredients.is_empty() {
        bail!("Please select some ingredients first (use --ingredient or --pantry-file)");
    }

    let policy = if cli.fail_fast {
        EnrichmentPolicy::FailFast
    } else {
        EnrichmentPolicy::Isolate
    };
    let timeout = Duration::from_secs(cli.timeout_secs);
    let config = ServiceConfig::from_env()
        .context("Failed to load service configuration")?
        .with_ranking(cli.ranking)
        .with_result_limit(cli.limit)
        .with_max_concurrent_enrichments(cli.limit.max(1))
        .with_request_timeout(Some(timeout))
        .with_enrichment_policy(policy);

    let client = SpoonacularClient::new(ClientConfig::from_env().with_http_timeout(timeout))
        .context("Failed to build Spoonacular HTTP client")?;
    let mut service = RecipeAggregationService::new(config, client)
        .context("Invalid service configuration")?;

    let outcome = service
        .find_recipes(&ingredients)
        .await
        .context("Recipe search failed")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
    } else {
        println!("Selected ingredients: {}\n", ingredients.join(", "));
        print_outcome(&outcome);
    }

    if cli.save {
        let added = service.add_saved(outcome.recipes)?;
        println!("\nSaved {} recipe(s).", added);
        let groceries = service.shopping_list();
        if groceries.is_empty() {
            println!("Nothing to buy.");
        } else {
            println!("Grocery list:");
            for (idx, item) in groceries.iter().enumerate() {
                println!("{}. {}", idx + 1, item);
            }
        }
    }

    Ok(())
}
