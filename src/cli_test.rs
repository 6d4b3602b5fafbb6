use super::*;
use clap::CommandFactory;

#[test]
fn clap_command_is_well_formed() {
    Cli::command().debug_assert();
}

#[test]
fn browse_parses_with_a_tag_filter() {
    let cli = Cli::try_parse_from(["guva", "browse", "--tag", "style"]).unwrap();
    let Command::Browse { tag } = cli.command else {
        panic!("expected browse");
    };
    assert_eq!(tag, "style");
}

#[test]
fn gen_defaults_workflow_and_lora() {
    let cli = Cli::try_parse_from(["guva", "gen", "--prompt", "a cat"]).unwrap();
    let Command::Gen { workflow, lora, prompt } = cli.command else {
        panic!("expected gen");
    };
    assert_eq!(workflow, "Text2Image Cartoon");
    assert!(lora.starts_with("Nishikigi Chisato"));
    assert_eq!(prompt, "a cat");
}

#[test]
fn mint_requires_at_least_one_file() {
    assert!(Cli::try_parse_from(["guva", "mint", "--name", "x", "--rent-price", "1"]).is_err());
    assert!(
        Cli::try_parse_from(["guva", "mint", "--name", "x", "--rent-price", "1", "--file", "a.safetensors"]).is_ok()
    );
}

#[test]
fn sell_parses_token_id_and_price() {
    let cli = Cli::try_parse_from(["guva", "sell", "--token-id", "7", "--price", "0.5"]).unwrap();
    let Command::Sell { token_id, price } = cli.command else {
        panic!("expected sell");
    };
    assert_eq!(token_id, 7);
    assert_eq!(price, "0.5");
}

#[test]
fn parse_tag_treats_all_as_no_filter() {
    assert_eq!(parse_tag("all").unwrap(), None);
    assert_eq!(parse_tag("All").unwrap(), None);
    assert_eq!(parse_tag("character").unwrap(), Some(catalog::Tag::Character));
    assert!(parse_tag("bogus").is_err());
}

#[test]
fn parse_status_treats_all_as_no_filter() {
    assert_eq!(parse_status("all").unwrap(), None);
    assert_eq!(parse_status("busy").unwrap(), Some(mining::MinerStatus::Busy));
    assert!(parse_status("offline").is_err());
}

#[test]
fn staged_files_take_basenames_and_tolerate_missing_paths() {
    let files = staged_files(&["/tmp/does-not-exist/lora.safetensors".to_owned()]);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].name, "lora.safetensors");
    assert_eq!(files[0].size, 0);
}
