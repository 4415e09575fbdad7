use hzip::{FrequencyTable, HuffmanCodec, HuffmanTree};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_text = "Hello, world! This is a sample text for Huffman compression. \
                      The quick brown fox jumps over the lazy dog. \
                      Huffman encoding is a greedy algorithm that builds optimal prefix codes.";

    println!("Sample text: {} bytes", sample_text.len());

    let frequencies = FrequencyTable::from_bytes(sample_text.as_bytes());
    let tree = HuffmanTree::from_frequencies(&frequencies)?;
    println!("{} distinct symbols", tree.leaf_count());
    print!("{}", tree);

    let codec = HuffmanCodec::new(frequencies)?;
    for (symbol, code) in codec.code_table().iter() {
        let bits: String = code.iter().by_vals().map(|b| if b { '1' } else { '0' }).collect();
        println!("{:?} -> {}", symbol as char, bits);
    }

    let compressed = HuffmanCodec::compress(sample_text.as_bytes())?;
    let compression_ratio = compressed.len() as f64 / sample_text.len() as f64;
    println!(
        "Compressed to: {} bytes ({:.1}% of original)",
        compressed.len(),
        compression_ratio * 100.0
    );

    let decompressed = HuffmanCodec::decompress(&compressed)?;
    if decompressed != sample_text.as_bytes() {
        return Err("Decompression verification failed".into());
    }
    println!("Decompression successful! Data matches exactly.");

    Ok(())
}
