use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use rand::Rng;
use regex::Regex;
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::{debug, info, warn};

use crate::cli::ImportArgs;
use crate::model::{
    ContentBox, Evidence, HeaderInfo, ImportCounts, ImportRunSummary, SectionKey, SectionMap,
    SourceEntry, Stage,
};
use crate::util::{now_utc_string, sha256_hex, truncate_chars, utc_compact_string, write_json_pretty};

mod assemble;
mod header;
mod loader;
mod run;
mod sections;
mod splitter;
mod store;

pub use run::run;

use assemble::*;
use header::*;
use loader::*;
use run::*;
use sections::*;
use splitter::*;
use store::*;
