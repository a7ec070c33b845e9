use packed_bits::bit_ops::{read_field, write_field};
use packed_bits::{BitField, BitIndex, PackedSliceMut};

fn main() -> Result<(), packed_bits::PackedBitsError> {
    println!("=== Packed Bits Examples ===\n");

    example_raw_fields()?;
    example_dense_records()?;
    example_named_fields();

    Ok(())
}

fn example_raw_fields() -> Result<(), packed_bits::PackedBitsError> {
    println!("Example 1: An 11-bit field straddling three bytes");

    let mut buf = [0u8; 4];
    write_field(&mut buf, 7, 11, 0x5A5)?;
    println!("  bytes: {:08b} {:08b} {:08b}", buf[0], buf[1], buf[2]);
    println!("  value: {:#x}", read_field(&buf, 7, 11)?);

    // values wider than the field are rejected
    println!("  overflow: {:?}", write_field(&mut buf, 7, 11, 0x800));
    println!();

    Ok(())
}

fn example_dense_records() -> Result<(), packed_bits::PackedBitsError> {
    println!("Example 2: 10-bit records, back to back");

    let mut bytes = [0u8; 10];
    let mut records = PackedSliceMut::<10>::new(&mut bytes)?;
    for i in 0..records.len() {
        records.set(i, (i as u32 * 113) % 1024)?;
    }
    let values: Vec<u32> = records.as_packed_slice().iter().collect();
    println!("  {} records in {} bytes: {:?}", values.len(), bytes.len(), values);
    println!();

    Ok(())
}

fn example_named_fields() {
    println!("Example 3: Named fields inside a 24-bit record");

    const FLAG: BitField = BitField::new(0, 1);
    const COUNT: BitField = BitField::new(1, 11);

    let mut buf = [0u8; 6];
    let second = BitIndex::of_byte(3);
    FLAG.write(&mut buf, second, 1);
    COUNT.write(&mut buf, second, 1500);
    println!(
        "  record 1: flag={} count={}",
        FLAG.read(&buf, second),
        COUNT.read(&buf, second)
    );
    println!();
}
