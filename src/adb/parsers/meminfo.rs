use crate::adb::types::MemoryMetrics;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static RE_PROCESS_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(.*)]").unwrap());

fn round_mb(kilobytes: f64) -> f64 {
    (kilobytes / 1024.0 * 10.0).round() / 10.0
}

/// Parses `dumpsys meminfo --local -s --package <pkg>` output into one
/// `MemoryMetrics` per process. Values are reported by the device in kB
/// and converted to MB with one decimal; `TOTAL PSS` is derived as the sum
/// of the seven component buckets.
pub fn parse_meminfo(output: &str) -> Result<BTreeMap<String, MemoryMetrics>, String> {
    if output.trim_start().starts_with("No process") {
        return Err("No process found for the requested package".to_string());
    }

    let mut processes: BTreeMap<String, MemoryMetrics> = BTreeMap::new();
    let mut current: Option<String> = None;

    for line in output.lines() {
        let line = line.trim();

        if line.starts_with("** MEMINFO") {
            let name = RE_PROCESS_NAME
                .captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .ok_or_else(|| format!("Malformed MEMINFO header: {}", line))?;
            processes.insert(name.clone(), MemoryMetrics::zeroed());
            current = Some(name);
            continue;
        }

        let Some(name) = &current else { continue };
        let Some((label, rest)) = line.split_once(':') else {
            continue;
        };

        let Some(metrics) = processes.get_mut(name) else {
            continue;
        };

        let value = rest.split_whitespace().next();
        let slot = match label.trim() {
            "Java Heap" => &mut metrics.java_heap,
            "Native Heap" => &mut metrics.native_heap,
            "Code" => &mut metrics.code,
            "Stack" => &mut metrics.stack,
            "Graphics" => &mut metrics.graphics,
            "Private Other" => &mut metrics.private_other,
            "System" => &mut metrics.system,
            _ => continue,
        };

        match value.and_then(|v| v.parse::<f64>().ok()) {
            Some(kilobytes) => *slot = round_mb(kilobytes),
            None => return Err(format!("Failed to parse meminfo line: {}", line)),
        }
    }

    if processes.is_empty() {
        return Err("No MEMINFO sections in dumpsys output".to_string());
    }

    for metrics in processes.values_mut() {
        metrics.total_pss = metrics.bucket_sum();
    }

    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_meminfo_sample() {
        let output = include_str!("../../../assets/sample_outputs/dumpsys_meminfo.txt");
        let processes = parse_meminfo(output).unwrap();

        assert_eq!(processes.len(), 2);

        let main = &processes["com.example.app"];
        assert_eq!(main.java_heap, 10.0);
        assert_eq!(main.native_heap, 20.0);
        assert_eq!(main.code, 8.0);
        assert_eq!(main.stack, 1.0);
        assert_eq!(main.graphics, 30.0);
        assert_eq!(main.private_other, 4.0);
        assert_eq!(main.system, 6.0);
        assert_eq!(main.total_pss, 79.0);

        let service = &processes["com.example.app:service"];
        assert_eq!(service.stack, 0.5);
        assert_eq!(service.total_pss, 10.5);
    }

    #[test]
    fn test_parse_no_process() {
        let result = parse_meminfo("No process found for: com.missing.app");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_empty_output() {
        assert!(parse_meminfo("").is_err());
    }
}
