use super::codec::Mode;
use super::error::QRResult;
use super::metadata::{BlockGroup, ECLevel, Version};

// Lookups by raw version number
//------------------------------------------------------------------------------

/// Max number of characters of `mode` a symbol of version `ver` holds at `ecl`.
pub fn max_capacity(ver: u8, ecl: ECLevel, mode: Mode) -> QRResult<usize> {
    Ok(Version::new(ver)?.char_capacity(ecl, mode))
}

/// Number of data bits (excluding ecc) a symbol of version `ver` holds at `ecl`.
pub fn total_bits(ver: u8, ecl: ECLevel) -> QRResult<usize> {
    Ok(Version::new(ver)?.data_bit_capacity(ecl))
}

pub fn block_layout(ver: u8, ecl: ECLevel) -> QRResult<Vec<BlockGroup>> {
    Ok(Version::new(ver)?.block_layout(ecl))
}


// Global constants
//------------------------------------------------------------------------------

// Character capacity per version & ec level: [Numeric, Alphanumeric, Byte]
#[rustfmt::skip]
pub(crate) static CHAR_CAPACITY: [[[usize; 3]; 4]; 41] = [
    [[0, 0, 0], [0, 0, 0], [0, 0, 0], [0, 0, 0]],
    [[41, 25, 17], [34, 20, 14], [27, 16, 11], [17, 10, 7]], // 1
    [[77, 47, 32], [63, 38, 26], [48, 29, 20], [34, 20, 14]], // 2
    [[127, 77, 53], [101, 61, 42], [77, 47, 32], [58, 35, 24]], // 3
    [[187, 114, 78], [149, 90, 62], [111, 67, 46], [82, 50, 34]], // 4
    [[255, 154, 106], [202, 122, 84], [144, 87, 60], [106, 64, 44]], // 5
    [[322, 195, 134], [255, 154, 106], [178, 108, 74], [139, 84, 58]], // 6
    [[370, 224, 154], [293, 178, 122], [207, 125, 86], [154, 93, 64]], // 7
    [[461, 279, 192], [365, 221, 152], [259, 157, 108], [202, 122, 84]], // 8
    [[552, 335, 230], [432, 262, 180], [312, 189, 130], [235, 143, 98]], // 9
    [[652, 395, 271], [513, 311, 213], [364, 221, 151], [288, 174, 119]], // 10
    [[772, 468, 321], [604, 366, 251], [427, 259, 177], [331, 200, 137]], // 11
    [[883, 535, 367], [691, 419, 287], [489, 296, 203], [374, 227, 155]], // 12
    [[1022, 619, 425], [796, 483, 331], [580, 352, 241], [427, 259, 177]], // 13
    [[1101, 667, 458], [871, 528, 362], [621, 376, 258], [468, 283, 194]], // 14
    [[1250, 758, 520], [991, 600, 412], [703, 426, 292], [530, 321, 220]], // 15
    [[1408, 854, 586], [1082, 656, 450], [775, 470, 322], [602, 365, 250]], // 16
    [[1548, 938, 644], [1212, 734, 504], [876, 531, 364], [674, 408, 280]], // 17
    [[1725, 1046, 718], [1346, 816, 560], [948, 574, 394], [746, 452, 310]], // 18
    [[1903, 1153, 792], [1500, 909, 624], [1063, 644, 442], [813, 493, 338]], // 19
    [[2061, 1249, 858], [1600, 970, 666], [1159, 702, 482], [919, 557, 382]], // 20
    [[2232, 1352, 929], [1708, 1035, 711], [1224, 742, 509], [969, 587, 403]], // 21
    [[2409, 1460, 1003], [1872, 1134, 779], [1358, 823, 565], [1056, 640, 439]], // 22
    [[2620, 1588, 1091], [2059, 1248, 857], [1468, 890, 611], [1108, 672, 461]], // 23
    [[2812, 1704, 1171], [2188, 1326, 911], [1588, 963, 661], [1228, 744, 511]], // 24
    [[3057, 1853, 1273], [2395, 1451, 997], [1718, 1041, 715], [1286, 779, 535]], // 25
    [[3283, 1990, 1367], [2544, 1542, 1059], [1804, 1094, 751], [1425, 864, 593]], // 26
    [[3514, 2132, 1465], [2701, 1637, 1125], [1933, 1172, 805], [1501, 910, 625]], // 27
    [[3669, 2223, 1528], [2857, 1732, 1190], [2085, 1263, 868], [1581, 958, 658]], // 28
    [[3909, 2369, 1628], [3035, 1839, 1264], [2181, 1322, 908], [1677, 1016, 698]], // 29
    [[4158, 2520, 1732], [3289, 1994, 1370], [2358, 1429, 982], [1782, 1080, 742]], // 30
    [[4417, 2677, 1840], [3486, 2113, 1452], [2473, 1499, 1030], [1897, 1150, 790]], // 31
    [[4686, 2840, 1952], [3693, 2238, 1538], [2670, 1618, 1112], [2022, 1226, 842]], // 32
    [[4965, 3009, 2068], [3909, 2369, 1628], [2805, 1700, 1168], [2157, 1307, 898]], // 33
    [[5253, 3183, 2188], [4134, 2506, 1722], [2949, 1787, 1228], [2301, 1394, 958]], // 34
    [[5529, 3351, 2303], [4343, 2632, 1809], [3081, 1867, 1283], [2361, 1431, 983]], // 35
    [[5836, 3537, 2431], [4588, 2780, 1911], [3244, 1966, 1351], [2524, 1530, 1051]], // 36
    [[6153, 3729, 2563], [4775, 2894, 1989], [3417, 2071, 1423], [2625, 1591, 1093]], // 37
    [[6479, 3927, 2699], [5039, 3054, 2099], [3599, 2181, 1499], [2735, 1658, 1139]], // 38
    [[6743, 4087, 2809], [5313, 3220, 2213], [3791, 2298, 1579], [2927, 1774, 1219]], // 39
    [[7089, 4296, 2953], [5596, 3391, 2331], [3993, 2420, 1663], [3057, 1852, 1273]], // 40
];

// Block layout per version & ec level:
// (ecc per block, block1 count, block1 data codewords, block2 count, block2 data codewords)
#[rustfmt::skip]
pub(crate) static BLOCK_LAYOUT: [[(usize, usize, usize, usize, usize); 4]; 41] = [
    [(0, 0, 0, 0, 0), (0, 0, 0, 0, 0), (0, 0, 0, 0, 0), (0, 0, 0, 0, 0)],
    [(7, 1, 19, 0, 0), (10, 1, 16, 0, 0), (13, 1, 13, 0, 0), (17, 1, 9, 0, 0)], // 1
    [(10, 1, 34, 0, 0), (16, 1, 28, 0, 0), (22, 1, 22, 0, 0), (28, 1, 16, 0, 0)], // 2
    [(15, 1, 55, 0, 0), (26, 1, 44, 0, 0), (18, 2, 17, 0, 0), (22, 2, 13, 0, 0)], // 3
    [(20, 1, 80, 0, 0), (18, 2, 32, 0, 0), (26, 2, 24, 0, 0), (16, 4, 9, 0, 0)], // 4
    [(26, 1, 108, 0, 0), (24, 2, 43, 0, 0), (18, 2, 15, 2, 16), (22, 2, 11, 2, 12)], // 5
    [(18, 2, 68, 0, 0), (16, 4, 27, 0, 0), (24, 4, 19, 0, 0), (28, 4, 15, 0, 0)], // 6
    [(20, 2, 78, 0, 0), (18, 4, 31, 0, 0), (18, 2, 14, 4, 15), (26, 4, 13, 1, 14)], // 7
    [(24, 2, 97, 0, 0), (22, 2, 38, 2, 39), (22, 4, 18, 2, 19), (26, 4, 14, 2, 15)], // 8
    [(30, 2, 116, 0, 0), (22, 3, 36, 2, 37), (20, 4, 16, 4, 17), (24, 4, 12, 4, 13)], // 9
    [(18, 2, 68, 2, 69), (26, 4, 43, 1, 44), (24, 6, 19, 2, 20), (28, 6, 15, 2, 16)], // 10
    [(20, 4, 81, 0, 0), (30, 1, 50, 4, 51), (28, 4, 22, 4, 23), (24, 3, 12, 8, 13)], // 11
    [(24, 2, 92, 2, 93), (22, 6, 36, 2, 37), (26, 4, 20, 6, 21), (28, 7, 14, 4, 15)], // 12
    [(26, 4, 107, 0, 0), (22, 8, 37, 1, 38), (24, 8, 20, 4, 21), (22, 12, 11, 4, 12)], // 13
    [(30, 3, 115, 1, 116), (24, 4, 40, 5, 41), (20, 11, 16, 5, 17), (24, 11, 12, 5, 13)], // 14
    [(22, 5, 87, 1, 88), (24, 5, 41, 5, 42), (30, 5, 24, 7, 25), (24, 11, 12, 7, 13)], // 15
    [(24, 5, 98, 1, 99), (28, 7, 45, 3, 46), (24, 15, 19, 2, 20), (30, 3, 15, 13, 16)], // 16
    [(28, 1, 107, 5, 108), (28, 10, 46, 1, 47), (28, 1, 22, 15, 23), (28, 2, 14, 17, 15)], // 17
    [(30, 5, 120, 1, 121), (26, 9, 43, 4, 44), (28, 17, 22, 1, 23), (28, 2, 14, 19, 15)], // 18
    [(28, 3, 113, 4, 114), (26, 3, 44, 11, 45), (26, 17, 21, 4, 22), (26, 9, 13, 16, 14)], // 19
    [(28, 3, 107, 5, 108), (26, 3, 41, 13, 42), (30, 15, 24, 5, 25), (28, 15, 15, 10, 16)], // 20
    [(28, 4, 116, 4, 117), (26, 17, 42, 0, 0), (28, 17, 22, 6, 23), (30, 19, 16, 6, 17)], // 21
    [(28, 2, 111, 7, 112), (28, 17, 46, 0, 0), (30, 7, 24, 16, 25), (24, 34, 13, 0, 0)], // 22
    [(30, 4, 121, 5, 122), (28, 4, 47, 14, 48), (30, 11, 24, 14, 25), (30, 16, 15, 14, 16)], // 23
    [(30, 6, 117, 4, 118), (28, 6, 45, 14, 46), (30, 11, 24, 16, 25), (30, 30, 16, 2, 17)], // 24
    [(26, 8, 106, 4, 107), (28, 8, 47, 13, 48), (30, 7, 24, 22, 25), (30, 22, 15, 13, 16)], // 25
    [(28, 10, 114, 2, 115), (28, 19, 46, 4, 47), (28, 28, 22, 6, 23), (30, 33, 16, 4, 17)], // 26
    [(30, 8, 122, 4, 123), (28, 22, 45, 3, 46), (30, 8, 23, 26, 24), (30, 12, 15, 28, 16)], // 27
    [(30, 3, 117, 10, 118), (28, 3, 45, 23, 46), (30, 4, 24, 31, 25), (30, 11, 15, 31, 16)], // 28
    [(30, 7, 116, 7, 117), (28, 21, 45, 7, 46), (30, 1, 23, 37, 24), (30, 19, 15, 26, 16)], // 29
    [(30, 5, 115, 10, 116), (28, 19, 47, 10, 48), (30, 15, 24, 25, 25), (30, 23, 15, 25, 16)], // 30
    [(30, 13, 115, 3, 116), (28, 2, 46, 29, 47), (30, 42, 24, 1, 25), (30, 23, 15, 28, 16)], // 31
    [(30, 17, 115, 0, 0), (28, 10, 46, 23, 47), (30, 10, 24, 35, 25), (30, 19, 15, 35, 16)], // 32
    [(30, 17, 115, 1, 116), (28, 14, 46, 21, 47), (30, 29, 24, 19, 25), (30, 11, 15, 46, 16)], // 33
    [(30, 13, 115, 6, 116), (28, 14, 46, 23, 47), (30, 44, 24, 7, 25), (30, 59, 16, 1, 17)], // 34
    [(30, 12, 121, 7, 122), (28, 12, 47, 26, 48), (30, 39, 24, 14, 25), (30, 22, 15, 41, 16)], // 35
    [(30, 6, 121, 14, 122), (28, 6, 47, 34, 48), (30, 46, 24, 10, 25), (30, 2, 15, 64, 16)], // 36
    [(30, 17, 122, 4, 123), (28, 29, 46, 14, 47), (30, 49, 24, 10, 25), (30, 24, 15, 46, 16)], // 37
    [(30, 4, 122, 18, 123), (28, 13, 46, 32, 47), (30, 48, 24, 14, 25), (30, 42, 15, 32, 16)], // 38
    [(30, 20, 117, 4, 118), (28, 40, 47, 7, 48), (30, 43, 24, 22, 25), (30, 10, 15, 67, 16)], // 39
    [(30, 19, 118, 6, 119), (28, 18, 47, 31, 48), (30, 34, 24, 34, 25), (30, 20, 15, 61, 16)], // 40
];

// Alignment pattern centers per version
#[rustfmt::skip]
pub(crate) static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 41] = [
    &[],
    &[], // 1
    &[6, 18], // 2
    &[6, 22], // 3
    &[6, 26], // 4
    &[6, 30], // 5
    &[6, 34], // 6
    &[6, 22, 38], // 7
    &[6, 24, 42], // 8
    &[6, 26, 46], // 9
    &[6, 28, 50], // 10
    &[6, 30, 54], // 11
    &[6, 32, 58], // 12
    &[6, 34, 62], // 13
    &[6, 26, 46, 66], // 14
    &[6, 26, 48, 70], // 15
    &[6, 26, 50, 74], // 16
    &[6, 30, 54, 78], // 17
    &[6, 30, 56, 82], // 18
    &[6, 30, 58, 86], // 19
    &[6, 34, 62, 90], // 20
    &[6, 28, 50, 72, 94], // 21
    &[6, 26, 50, 74, 98], // 22
    &[6, 30, 54, 78, 102], // 23
    &[6, 28, 54, 80, 106], // 24
    &[6, 32, 58, 84, 110], // 25
    &[6, 30, 58, 86, 114], // 26
    &[6, 34, 62, 90, 118], // 27
    &[6, 26, 50, 74, 98, 122], // 28
    &[6, 30, 54, 78, 102, 126], // 29
    &[6, 26, 52, 78, 104, 130], // 30
    &[6, 30, 56, 82, 108, 134], // 31
    &[6, 34, 60, 86, 112, 138], // 32
    &[6, 30, 58, 86, 114, 142], // 33
    &[6, 34, 62, 90, 118, 146], // 34
    &[6, 30, 54, 78, 102, 126, 150], // 35
    &[6, 24, 50, 76, 102, 128, 154], // 36
    &[6, 28, 54, 80, 106, 132, 158], // 37
    &[6, 32, 58, 84, 110, 136, 162], // 38
    &[6, 26, 54, 82, 110, 138, 166], // 39
    &[6, 30, 58, 86, 114, 142, 170], // 40
];
