use colored::*;
use ndarray::array;

use recipe_lp::{solve, LinearProgram, PlanError, PlannerConfig, RecipeMatrix};

fn main() -> Result<(), PlanError> {
    env_logger::init();

    //items: heavy, light, gas, water, oil
    //  40 heavy + 30 water = 30 light
    //  30 light + 30 water = 20 gas
    //  100 oil = 30 heavy + 30 light + 40 gas
    //  100 oil + 50 water = 10 heavy + 45 light + 55 gas
    let items = ["heavy", "light", "gas", "water", "oil"];
    let base = array![
        [-40.0, 0.0, 30.0, 10.0],
        [30.0, -30.0, 30.0, 45.0],
        [0.0, 20.0, 40.0, 55.0],
        [-30.0, -30.0, 0.0, -50.0],
        [0.0, 0.0, -100.0, -100.0],
    ];

    //water and oil can be bought
    let rm = RecipeMatrix::build(&base, &[3, 4])?;
    println!("recipe matrix {:?}:\n{}", rm.shape(), rm.matrix());

    let mut alternates: Vec<_> = rm.alternate_items().into_iter().map(|i| items[i]).collect();
    alternates.sort();
    let mut byproducts: Vec<_> = rm.byproduct_items().into_iter().map(|i| items[i]).collect();
    byproducts.sort();
    println!("{} {:?}", "items with alternate recipes:".yellow(), alternates);
    println!("{} {:?}", "items made as byproducts:".yellow(), byproducts);

    //300 gas, oil preferred over water
    let target = array![0.0, 0.0, 300.0, 0.0, 0.0];
    let raw = rm.raw_recipes();
    let priority = [raw[1], raw[0]];

    let lp = LinearProgram::formulate(&rm, &target, &priority, &PlannerConfig::default())?;
    println!("{}\n{}", "model:".bold(), lp);

    let plan = solve(&rm, &target, &priority)?;
    println!("{}\n{}", "plan:".bold(), plan);

    for (recipe, runs) in plan.raw_usage() {
        if let Some(item) = rm.raw_item_of(recipe) {
            println!("buy {:.3} {}", runs, items[item.row()]);
        }
    }

    if plan.satisfies(&target, 1.0e-6)? {
        println!("{}", "Target met!".green());
    } else {
        println!("{}", "Target missed".red());
    }
    Ok(())
}
