extern crate clap;

use std::io::{self, BufReader, BufRead};
use std::mem;
use std::str::FromStr;
use std::process::exit;
use std::time::SystemTime;
use clap::{Arg, App, SubCommand, ArgMatches};

use anatrie::*;

fn output_anagram<S: AsRef<str> + serde::Serialize>(anagram: &[S], json: bool) {
    if json {
        match serde_json::to_string(anagram) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("ERROR: unable to serialize anagram: {}", e),
        }
    } else {
        let words: Vec<&str> = anagram.iter().map(|word| word.as_ref()).collect();
        println!("{}", words.join(" "));
    }
}

///Runs a search for a single phrase, returns the number of anagrams found
fn process(dictionary: &Dictionary, phrase: &str, bywords: bool, session: &mut SearchSession, max_results: usize, json: bool) -> usize {
    let limit = if max_results == 0 { usize::MAX } else { max_results };
    let mut count = 0;
    if bywords {
        for anagram in dictionary.word_anagrams(phrase, session).take(limit) {
            output_anagram(&anagram, json);
            count += 1;
        }
        session.cache.check();
    } else {
        for anagram in dictionary.char_anagrams(phrase, session.params()).take(limit) {
            output_anagram(&anagram, json);
            count += 1;
        }
    }
    count
}

///Parses a numeric option into the type it is stored as, out of range values are an error
fn number_arg<T: FromStr + Default>(args: &ArgMatches, name: &str) -> Result<T, String> {
    match args.value_of(name).map(|value| value.parse::<T>()) {
        Some(Ok(value)) => Ok(value),
        Some(Err(_)) => Err(format!("--{} should be a non-negative integer of at most {} bits", name, mem::size_of::<T>() * 8)),
        None => Ok(T::default()),
    }
}

fn parse_number<T: FromStr + Default>(args: &ArgMatches, name: &str) -> T {
    match number_arg(args, name) {
        Ok(value) => value,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            exit(2);
        }
    }
}

///Arguments for loading the dictionary, shared by all subcommands
pub fn dictionary_arguments<'a,'b>() -> Vec<clap::Arg<'a,'b>> {
    let mut args: Vec<Arg> = Vec::new();
    args.push( Arg::with_name("wordlist")
        .long("wordlist")
        .short("w")
        .help("Word list to draw words from, one word per line (may be used multiple times). Lines are trimmed and lowercased, lines that are not purely alphabetic are skipped.")
        .takes_value(true)
        .number_of_values(1)
        .multiple(true)
        .required(true));
    args.push(Arg::with_name("ignore")
        .long("ignore")
        .short("i")
        .help("List of words to leave out of the word lists, one per line (may be used multiple times)")
        .takes_value(true)
        .number_of_values(1)
        .multiple(true));
    args.push(Arg::with_name("column")
        .long("column")
        .help("Tab separated column (0-indexed) in the word lists that holds the word")
        .takes_value(true)
        .default_value("0"));
    args
}

///Arguments for the search subcommands
pub fn common_arguments<'a,'b>() -> Vec<clap::Arg<'a,'b>> {
    let mut args = dictionary_arguments();
    args.push(Arg::with_name("min-length")
        .long("min-length")
        .help("Minimum length of every word in an anagram")
        .takes_value(true)
        .default_value("1"));
    args.push(Arg::with_name("max-words")
        .long("max-words")
        .short("m")
        .help("Maximum number of words per anagram (0 for unlimited)")
        .takes_value(true)
        .default_value("0"));
    args.push(Arg::with_name("max-results")
        .long("max-results")
        .short("n")
        .help("Maximum number of anagrams to output per phrase (0 for unlimited)")
        .takes_value(true)
        .default_value("0"));
    args.push(Arg::with_name("no-repeats")
        .long("no-repeats")
        .help("Do not use the same word more than once in a single anagram (word search only)")
        .required(false));
    args.push(Arg::with_name("cache-size")
        .long("cache-size")
        .help("Clear the search cache between phrases once it holds more than this number of states (word search only, 0 for no limit)")
        .takes_value(true)
        .default_value("0"));
    args.push(Arg::with_name("json")
        .long("json")
        .short("j")
        .help("Output every anagram as a json array instead of space separated words")
        .required(false));
    args.push(Arg::with_name("phrase")
        .help("The phrase to find anagrams of (all arguments are joined). If not given, phrases are read from standard input, one per line")
        .takes_value(true)
        .multiple(true)
        .required(false));
    args
}


fn build_app<'a,'b>() -> App<'a,'b> {
    App::new("Anatrie")
                    .version("0.1")
                    .author("Maarten van Gompel (proycon) <proycon@anaproy.nl>")
                    .about("Finds all anagrams of a phrase in a lexicon")
                    .subcommand(
                        SubCommand::with_name("chars")
                            .about("Search anagrams letter by letter, through a trie")
                            .args(&common_arguments())
                    )
                    .subcommand(
                        SubCommand::with_name("words")
                            .about("Search anagrams word by word, caching intermediate results")
                            .args(&common_arguments())
                    )
                    .subcommand(
                        SubCommand::with_name("export")
                            .about("Output the trie as json")
                            .args(&dictionary_arguments())
                    )
                    .arg(Arg::with_name("debug")
                        .long("debug")
                        .short("D")
                        .help("Debug")
                        .required(false))
}

fn main() {
    let rootargs = build_app().get_matches();

    let (command, args) = match rootargs.subcommand() {
        (command, Some(args)) => (command, args),
        _ => {
            eprintln!("ERROR: No command specified, use one of chars, words or export (see --help)");
            exit(2);
        }
    };

    let mut dictionary = Dictionary::new(rootargs.is_present("debug"));

    if let Some(filenames) = args.values_of("ignore") {
        eprintln!("Loading ignore lists...");
        for filename in filenames {
            if let Err(e) = dictionary.read_ignorelist(filename) {
                eprintln!("ERROR: Unable to read ignore list {}: {}", filename, e);
                exit(1);
            }
        }
    }

    eprintln!("Loading word lists...");
    let wordlist_params = WordlistParams {
        text_column: parse_number::<u8>(args, "column"),
    };
    if let Some(filenames) = args.values_of("wordlist") {
        for filename in filenames {
            if let Err(e) = dictionary.read_wordlist(filename, &wordlist_params) {
                eprintln!("ERROR: Unable to read word list {}: {}", filename, e);
                exit(1);
            }
        }
    }
    eprintln!(" - Dictionary holds {} words", dictionary.wordlist.len());

    if command == "export" {
        match dictionary.trie.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("ERROR: Unable to export trie: {}", e);
                exit(1);
            }
        }
        return;
    }

    let params = SearchParameters::default()
        .with_repeats(!args.is_present("no-repeats"))
        .with_max_words(parse_number::<usize>(args, "max-words"))
        .with_min_word_length(parse_number::<usize>(args, "min-length"));
    let mut session = SearchSession::with_cache(params, AnagramCache::new(parse_number::<usize>(args, "cache-size")));
    let bywords = command == "words";
    let max_results = parse_number::<usize>(args, "max-results");
    let json = args.is_present("json");

    if let Some(phrase) = args.values_of("phrase") {
        let phrase: Vec<&str> = phrase.collect();
        let begintime = SystemTime::now();
        let count = process(&dictionary, &phrase.join(" "), bywords, &mut session, max_results, json);
        if let Ok(elapsed) = begintime.elapsed() {
            eprintln!("(found {} anagrams in {} ms)", count, elapsed.as_millis());
        }
    } else {
        eprintln!("(accepting standard input; enter phrases to find anagrams of, one per line)");
        let stdin = io::stdin();
        for line in BufReader::new(stdin).lines() {
            match line {
                Ok(phrase) => {
                    if !phrase.trim().is_empty() {
                        process(&dictionary, &phrase, bywords, &mut session, max_results, json);
                    }
                },
                Err(e) => {
                    eprintln!("ERROR: Unable to read standard input: {}", e);
                    exit(1);
                }
            }
        }
    }
}
