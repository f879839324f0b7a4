//! Sorted Set Commands
//!
//! A sorted set occupies three slices of the keyspace (see [`crate::keys`]):
//! the meta record holding the type tag and cardinality, one member entry per
//! member carrying its packed score, and one (score, member) index entry per
//! member so rank ranges are a single ascending prefix scan. Every mutation
//! keeps all three in step within the command's write batch.

use crate::commands::dispatch::Context;
use crate::error::{CommandError, HandlerError};
use crate::keys::{self, TypeTag, SCORE_LEN};
use crate::protocol::{Element, Reply};
use crate::storage::WriteBatch;
use bytes::Bytes;
use std::collections::{HashMap, HashSet};

/// ZADD key score member [score member ...]
pub fn zadd(
    context: &Context<'_>,
    args: &[Bytes],
    batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let batch = batch.expect("zadd is registered as a write command");
    let key = &args[0];
    let pairs = &args[1..];
    if pairs.len() % 2 != 0 {
        return Err(CommandError::Syntax.into());
    }

    let card = read_card(context, key)?.unwrap_or(0);
    // Scores written earlier in this same command are not yet visible in the
    // store, so track them locally; the last score for a member wins.
    let mut pending: HashMap<Bytes, f64> = HashMap::new();
    let mut added = 0u64;

    for pair in pairs.chunks_exact(2) {
        let score = parse_score(&pair[0])?;
        let member = &pair[1];

        let previous = match pending.get(member) {
            Some(pending_score) => Some(*pending_score),
            None => read_member_score(context, key, member)?,
        };
        match previous {
            Some(old) if keys::encode_score(old) == keys::encode_score(score) => {
                pending.insert(member.clone(), score);
                continue;
            }
            Some(old) => {
                batch.delete(keys::zset_score_key(key, old, member));
            }
            None => added += 1,
        }
        batch.put(keys::zset_member_key(key, member), packed(score));
        batch.put(keys::zset_score_key(key, score, member), Bytes::new());
        pending.insert(member.clone(), score);
    }

    if added > 0 {
        batch.put(keys::meta_key(key), meta_value(card + added));
    }
    Ok(Reply::integer(added as i64))
}

/// ZCARD key
pub fn zcard(
    context: &Context<'_>,
    args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let card = read_card(context, &args[0])?.unwrap_or(0);
    Ok(Reply::integer(card as i64))
}

/// ZSCORE key member
pub fn zscore(
    context: &Context<'_>,
    args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let key = &args[0];
    if read_card(context, key)?.is_none() {
        return Ok(Reply::nil_bulk());
    }
    match read_member_score(context, key, &args[1])? {
        Some(score) => Ok(Reply::bulk(format_score(score))),
        None => Ok(Reply::nil_bulk()),
    }
}

/// ZINCRBY key increment member
pub fn zincrby(
    context: &Context<'_>,
    args: &[Bytes],
    batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let batch = batch.expect("zincrby is registered as a write command");
    let key = &args[0];
    let increment = parse_score(&args[1])?;
    let member = &args[2];

    let card = read_card(context, key)?.unwrap_or(0);
    let previous = read_member_score(context, key, member)?;
    let score = previous.unwrap_or(0.0) + increment;
    if score.is_nan() {
        return Err(CommandError::NanScore.into());
    }

    if let Some(old) = previous {
        if keys::encode_score(old) != keys::encode_score(score) {
            batch.delete(keys::zset_score_key(key, old, member));
        }
    } else {
        batch.put(keys::meta_key(key), meta_value(card + 1));
    }
    batch.put(keys::zset_member_key(key, member), packed(score));
    batch.put(keys::zset_score_key(key, score, member), Bytes::new());

    Ok(Reply::bulk(format_score(score)))
}

/// ZREM key member [member ...]
pub fn zrem(
    context: &Context<'_>,
    args: &[Bytes],
    batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    let batch = batch.expect("zrem is registered as a write command");
    let key = &args[0];
    let Some(card) = read_card(context, key)? else {
        return Ok(Reply::integer(0));
    };

    let mut seen: HashSet<Bytes> = HashSet::new();
    let mut removed = 0u64;
    for member in &args[1..] {
        if !seen.insert(member.clone()) {
            continue;
        }
        if let Some(score) = read_member_score(context, key, member)? {
            batch.delete(keys::zset_member_key(key, member));
            batch.delete(keys::zset_score_key(key, score, member));
            removed += 1;
        }
    }

    if removed > 0 {
        let remaining = card.saturating_sub(removed);
        if remaining == 0 {
            batch.delete(keys::meta_key(key));
        } else {
            batch.put(keys::meta_key(key), meta_value(remaining));
        }
    }
    Ok(Reply::integer(removed as i64))
}

/// ZRANGE key start stop [withscores]
pub fn zrange(
    context: &Context<'_>,
    args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    range(context, args, false)
}

/// ZREVRANGE key start stop [withscores]
pub fn zrevrange(
    context: &Context<'_>,
    args: &[Bytes],
    _batch: Option<&mut WriteBatch>,
) -> Result<Reply, HandlerError> {
    range(context, args, true)
}

fn range(context: &Context<'_>, args: &[Bytes], reverse: bool) -> Result<Reply, HandlerError> {
    let key = &args[0];
    let mut start = parse_rank(&args[1])?;
    let mut stop = parse_rank(&args[2])?;
    let with_scores = match args.len() {
        3 => false,
        4 if args[3].eq_ignore_ascii_case(b"withscores") => true,
        _ => return Err(CommandError::Syntax.into()),
    };

    if read_card(context, key)?.is_none() {
        return Ok(Reply::sequence(Vec::new()));
    }

    let entries = context.scan_prefix(&keys::zset_score_prefix(key))?;
    let count = entries.len() as i64;
    if start < 0 {
        start += count;
    }
    if stop < 0 {
        stop += count;
    }
    start = start.max(0);
    stop = stop.min(count - 1);
    if start > stop || start >= count {
        return Ok(Reply::sequence(Vec::new()));
    }

    let prefix_len = keys::zset_score_prefix(key).len();
    let mut elements = Vec::with_capacity((stop - start + 1) as usize * if with_scores { 2 } else { 1 });
    for rank in start..=stop {
        let index = if reverse { count - 1 - rank } else { rank } as usize;
        let (entry_key, _) = &entries[index];
        elements.push(Element::Bulk(entry_key.slice(prefix_len + SCORE_LEN..)));
        if with_scores {
            let mut raw = [0u8; SCORE_LEN];
            raw.copy_from_slice(&entry_key[prefix_len..prefix_len + SCORE_LEN]);
            elements.push(Element::Bulk(Bytes::from(format_score(keys::decode_score(raw)))));
        }
    }
    Ok(Reply::sequence(elements))
}

/// Queues removal of a sorted set's meta record and every payload entry.
///
/// Called by the type-polymorphic deletion path once the meta record's tag
/// has identified the key as a sorted set.
pub(crate) fn queue_delete(
    context: &Context<'_>,
    key: &[u8],
    batch: &mut WriteBatch,
) -> Result<(), HandlerError> {
    let prefix = keys::zset_member_prefix(key);
    for (entry_key, value) in context.scan_prefix(&prefix)? {
        if value.len() != SCORE_LEN {
            return Err(CommandError::InvalidData.into());
        }
        let mut raw = [0u8; SCORE_LEN];
        raw.copy_from_slice(&value);
        let score = keys::decode_score(raw);
        batch.delete(keys::zset_score_key(key, score, &entry_key[prefix.len()..]));
        batch.delete(entry_key);
    }
    batch.delete(keys::meta_key(key));
    Ok(())
}

fn meta_value(card: u64) -> Bytes {
    let mut value = Vec::with_capacity(1 + 8);
    value.push(TypeTag::Zset.as_byte());
    value.extend_from_slice(&card.to_be_bytes());
    Bytes::from(value)
}

fn packed(score: f64) -> Bytes {
    Bytes::copy_from_slice(&keys::encode_score(score))
}

/// Reads and validates a key's meta record; `None` means the key is absent.
fn read_card(context: &Context<'_>, key: &[u8]) -> Result<Option<u64>, HandlerError> {
    let Some(meta) = context.get(&keys::meta_key(key))? else {
        return Ok(None);
    };
    if meta.is_empty() {
        return Err(CommandError::InvalidData.into());
    }
    if meta[0] != TypeTag::Zset.as_byte() {
        return Err(CommandError::WrongType.into());
    }
    if meta.len() != 1 + 8 {
        return Err(CommandError::InvalidData.into());
    }
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&meta[1..]);
    Ok(Some(u64::from_be_bytes(raw)))
}

fn read_member_score(
    context: &Context<'_>,
    key: &[u8],
    member: &[u8],
) -> Result<Option<f64>, HandlerError> {
    let Some(value) = context.get(&keys::zset_member_key(key, member))? else {
        return Ok(None);
    };
    if value.len() != SCORE_LEN {
        return Err(CommandError::InvalidData.into());
    }
    let mut raw = [0u8; SCORE_LEN];
    raw.copy_from_slice(&value);
    Ok(Some(keys::decode_score(raw)))
}

fn parse_score(arg: &[u8]) -> Result<f64, CommandError> {
    std::str::from_utf8(arg)
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .filter(|score| !score.is_nan())
        .ok_or(CommandError::NotAFloat)
}

fn parse_rank(arg: &[u8]) -> Result<i64, CommandError> {
    std::str::from_utf8(arg)
        .ok()
        .and_then(|text| text.parse::<i64>().ok())
        .ok_or(CommandError::NotAnInteger)
}

/// Formats a score the way clients expect: integral scores print without a
/// fractional part.
fn format_score(score: f64) -> String {
    if score == score.trunc() && score.abs() < 1e17 {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}
