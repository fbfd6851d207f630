/// A parsed player command. Arguments are kept as typed, minus surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Fight(String),
    Explore(String),
    Heal(String),
    Rest,
    Inventory,
    Stats,
    Quest,
    Shop,
    Buy(String),
    Use(String),
    Equip(String),
    Help,
    Save,
    Load,
    Reset,
    Clear,
    Quit,
    Unknown(String),
    Empty,
}

const FIGHT: &[&str] = &["fight", "attack", "battle", "kill", "assault", "strike"];
const EXPLORE: &[&str] = &["explore", "travel", "venture", "journey", "wander"];
const HEAL: &[&str] = &["heal", "potion", "recover", "cure"];
const REST: &[&str] = &["rest", "sleep"];
const INVENTORY: &[&str] = &["inventory", "inv", "items", "gear"];
const STATS: &[&str] = &["stats", "status", "info", "character", "profile"];
const QUEST: &[&str] = &["quest", "mission", "task", "objective"];
const SHOP: &[&str] = &["shop", "purchase", "store", "market"];
const HELP: &[&str] = &["help", "commands", "guide", "tutorial", "?"];
const SAVE: &[&str] = &["save", "backup"];
const LOAD: &[&str] = &["load", "restore", "continue"];
const CLEAR: &[&str] = &["clear", "cls", "clean"];
const QUIT: &[&str] = &["quit", "exit"];

/// Splits `input` into an action word and its argument and maps the action
/// through the synonym sets, ignoring case.
///
/// `buy` with an argument is a purchase; a bare `buy` opens the shop.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let (verb, arg) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    };
    if verb.is_empty() {
        return Command::Empty;
    }
    let verb = verb.to_lowercase();
    let is = |set: &[&str]| set.contains(&verb.as_str());
    let arg = arg.to_string();

    if is(FIGHT) {
        Command::Fight(arg)
    } else if is(EXPLORE) {
        Command::Explore(arg)
    } else if is(HEAL) {
        Command::Heal(arg)
    } else if is(REST) {
        Command::Rest
    } else if is(INVENTORY) {
        Command::Inventory
    } else if is(STATS) {
        Command::Stats
    } else if is(QUEST) {
        Command::Quest
    } else if verb == "buy" {
        if arg.is_empty() {
            Command::Shop
        } else {
            Command::Buy(arg)
        }
    } else if is(SHOP) {
        Command::Shop
    } else if verb == "use" {
        Command::Use(arg)
    } else if verb == "equip" {
        Command::Equip(arg)
    } else if is(HELP) {
        Command::Help
    } else if is(SAVE) {
        Command::Save
    } else if is(LOAD) {
        Command::Load
    } else if verb == "reset" {
        Command::Reset
    } else if is(CLEAR) {
        Command::Clear
    } else if is(QUIT) {
        Command::Quit
    } else {
        Command::Unknown(verb)
    }
}
