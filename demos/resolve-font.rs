// font-locate/demos/resolve-font.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Resolves a font request against the packaged and system fonts, and optionally the remote font
//! directory.

extern crate clap;
extern crate font_locate;

use clap::{Arg, ArgAction, ArgMatches, Command};
use font_locate::providers::{RemoteProvider, SystemConfig, SystemProvider};
use font_locate::{
    resolve_font_loc_with_cancel, CancelToken, Descriptor, EmbeddedProvider, ProviderChain,
    Style, Weight,
};
use std::time::Duration;

fn get_args() -> ArgMatches {
    let pattern_arg = Arg::new("PATTERN")
        .help("Family-name pattern (a regular expression)")
        .default_value("DejaVuSansMono")
        .index(1);
    let italic_arg = Arg::new("italic")
        .help("Request an italic variant")
        .short('i')
        .long("italic")
        .action(ArgAction::SetTrue);
    let weight_arg = Arg::new("weight")
        .help("Requested weight, 100 to 900")
        .short('w')
        .long("weight")
        .default_value("400");
    let timeout_arg = Arg::new("timeout")
        .help("Give up after this many milliseconds")
        .short('t')
        .long("timeout")
        .default_value("5000");
    let app_key_arg = Arg::new("app-key")
        .help("Application key under which a font list is looked for")
        .long("app-key")
        .default_value("font-locate");
    let no_system_arg = Arg::new("no-system")
        .help("Use the packaged fonts only")
        .long("no-system")
        .action(ArgAction::SetTrue);
    let remote_arg = Arg::new("remote")
        .help("Also search the remote font directory (needs GOOGLE_FONTS_API_KEY)")
        .short('r')
        .long("remote")
        .action(ArgAction::SetTrue);
    Command::new("resolve-font")
        .version("0.1")
        .author("The Pathfinder Project Developers")
        .about("Simple example tool to resolve fonts with `font-locate`")
        .arg(pattern_arg)
        .arg(italic_arg)
        .arg(weight_arg)
        .arg(timeout_arg)
        .arg(app_key_arg)
        .arg(no_system_arg)
        .arg(remote_arg)
        .get_matches()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let matches = get_args();

    let pattern = matches.get_one::<String>("PATTERN").map(|s| s.as_str()).unwrap_or("");
    let weight: f32 = matches
        .get_one::<String>("weight")
        .map(|s| s.as_str())
        .unwrap_or("400")
        .parse()?;
    let timeout: u64 = matches
        .get_one::<String>("timeout")
        .map(|s| s.as_str())
        .unwrap_or("5000")
        .parse()?;
    let style = if matches.get_flag("italic") {
        Style::Italic
    } else {
        Style::Normal
    };

    let app_key = matches.get_one::<String>("app-key").cloned().unwrap_or_default();
    let mut chain = ProviderChain::new();
    if !matches.get_flag("no-system") {
        chain.push(SystemProvider::new(SystemConfig::new(app_key.clone())));
    }
    if matches.get_flag("remote") {
        chain.push(RemoteProvider::from_env(app_key));
    }
    chain.push(EmbeddedProvider::new());

    let descriptor = Descriptor::new(pattern).style(style).weight(Weight(weight));
    println!("Key: {}", descriptor.normalized_name());
    let cancel = CancelToken::with_timeout(Duration::from_millis(timeout));
    let resolution = resolve_font_loc_with_cancel(cancel, descriptor, chain).wait();

    println!("Font: {}", resolution.font.name);
    println!("Path: {}", resolution.font.path());
    println!("Source: {:?}", resolution.font.source());
    println!("Style: {:?}", resolution.font.style);
    println!("Weight: {}", resolution.font.weight);
    if let Some(error) = resolution.error {
        println!("Error: {}", error);
    }
    if !resolution.font.is_null() {
        println!("Size: {} bytes", resolution.font.read_bytes()?.len());
    }
    Ok(())
}
