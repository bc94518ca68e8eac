/* demos/demo.rs */

use realip::{HeaderMap, is_private_address, resolve_client_ip, resolve_client_ip_simple};

fn main() {
    println!("=== Client IP Resolution Examples ===\n");

    // Example 1: Private entries in X-Forwarded-For are skipped
    example_1_forwarded_chain();

    // Example 2: Header precedence
    example_2_header_priority();

    // Example 3: Fallback to the connection address
    example_3_connection_address();

    // Example 4: Nothing public anywhere
    example_4_unresolved();

    // Example 5: Legacy resolver
    example_5_simple_mode();

    // Example 6: Classifying addresses directly
    example_6_classifier();

    println!("=== All examples completed! ===");
}

fn print_resolved(headers: &HeaderMap, remote_addr: &str) {
    match resolve_client_ip(headers, remote_addr) {
        Some(resolved) => println!("Resolved IP: {} (from {})", resolved, resolved.source()),
        None => println!("No public IP found"),
    }
}

fn example_1_forwarded_chain() {
    println!("Example 1: X-Forwarded-For chain");

    let mut headers = HeaderMap::new();
    headers.insert(
        "X-Forwarded-For".to_string(),
        " 127.0.0.1 , 115.98.247.136, 144.12.54.87:1234 , 119.14.55.11:1234 ,".to_string(),
    );

    print_resolved(&headers, "10.0.0.1:52000");
    println!();
}

fn example_2_header_priority() {
    println!("Example 2: Multiple headers with priority");

    let mut headers = HeaderMap::new();
    headers.insert("X-Forwarded-For".to_string(), "192.168.1.10".to_string());
    headers.insert("X-Real-Ip".to_string(), "203.0.113.100".to_string());
    headers.insert("X-Client-Ip".to_string(), "198.51.100.200".to_string());

    println!("Headers present:");
    for (key, value) in &headers {
        println!("  {}: {}", key, value);
    }

    print_resolved(&headers, "10.0.0.1:52000");
    println!();
}

fn example_3_connection_address() {
    println!("Example 3: Fallback to connection address");

    let mut headers = HeaderMap::new();
    headers.insert("X-Forwarded-For".to_string(), "127.0.0.1:1234".to_string());

    print_resolved(&headers, "144.12.54.87");
    print_resolved(&HeaderMap::new(), "[2001:db8::7]:443");
    println!();
}

fn example_4_unresolved() {
    println!("Example 4: Only private or malformed sources");

    let mut headers = HeaderMap::new();
    headers.insert("X-Forwarded-For".to_string(), ":".to_string());
    headers.insert("X-Real-Ip".to_string(), "10.0.0.8".to_string());

    print_resolved(&headers, "--");
    println!();
}

fn example_5_simple_mode() {
    println!("Example 5: Legacy resolver");

    println!(
        "No headers: {}",
        resolve_client_ip_simple(&HeaderMap::new(), "144.12.54.87:8080")
    );

    let mut headers = HeaderMap::new();
    headers.insert("X-Real-Ip".to_string(), "192.168.1.100".to_string());
    headers.insert("X-Forwarded-For".to_string(), "127.0.0.0, 10.0.0.1".to_string());
    println!(
        "Nothing public in chain, unchecked X-Real-Ip: {}",
        resolve_client_ip_simple(&headers, "203.0.113.50:443")
    );
    println!();
}

fn example_6_classifier() {
    println!("Example 6: Classifier");

    for addr in ["172.15.0.0", "172.16.0.0", "172.31.0.0", "172.32.0.0", "fc00::", "abc"] {
        match is_private_address(addr) {
            Ok(private) => println!("  {:<12} private={}", addr, private),
            Err(err) => println!("  {:<12} {}", addr, err),
        }
    }
    println!();
}
